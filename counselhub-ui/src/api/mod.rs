//! API Access
//!
//! Thin gloo-net wrappers over the shared endpoint table.

mod client;

pub use client::*;
