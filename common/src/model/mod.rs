pub mod config;
pub mod customer;
pub mod document;
pub mod firmendaten;
pub mod input;
pub mod place_holder;
pub mod template;
