//! The BAFA template engine: placeholder resolution, table rendering, token
//! substitution and update zones, tied together by [`materialize`].

pub mod aliases;
pub mod materialize;
pub mod resolver;
pub mod tables;
pub mod tokens;
pub mod zones;
