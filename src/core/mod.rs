// Core modules implementing escape decoding, quote unwrapping, and error modeling.
pub mod error;
pub mod escape;
pub mod unwrap;
