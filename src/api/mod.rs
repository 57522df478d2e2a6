//! Purpose: Define the stable public Rust API boundary for jsonmend.
//! Exports: Decoding operations, the repair-module contract, and error types.
//! Role: Public, additive-only surface; hides internal decoder modules.
//! Invariants: This module is the only public path to the decoding primitives.
//! Invariants: Internal modules remain private and are not directly exposed.

mod repair;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::escape::{decode, Variant};
pub use crate::core::unwrap::{advanced_unescape, classify, QuoteWrapper};
pub use repair::{CommandModule, RepairEntry, RepairModule, RepairOutput};
