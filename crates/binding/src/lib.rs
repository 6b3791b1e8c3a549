//! Contract bindings for the token contract.
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod token;
