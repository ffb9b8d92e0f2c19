//! Re-exports for no_std compatibility
//!
//! Only compiled when the `nostd` feature is enabled. Everything else in this crate
//! goes through `alloc` directly, so formatting is the only piece that needs an alias.

pub use core::fmt;
