//! Data model shared between the BAFA document backend and its clients.
//!
//! Everything in here is plain serde data. Field names follow the camelCase
//! wire format the frontend already speaks.

pub mod model;
pub mod requests;
pub mod responses;
