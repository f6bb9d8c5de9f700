//! Entity definition macros

pub mod macros;
