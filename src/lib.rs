//! Purpose: Shared core library crate used by the `jsonmend` CLI and tests.
//! Exports: `api` (decoding operations, repair boundary, errors), `status`.
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: Treat the crate API as internal until a dedicated library release.
//! Invariants: Decoding is pure and stateless; no hidden state between calls.
pub mod api;
pub mod status;

mod core;
