//! Common types used across the Coincheck client library.

pub mod common;
pub mod serde_helpers;

pub use common::*;
