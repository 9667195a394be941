//! Integration test utilities for typing presence
//!
//! This crate wires several chat sessions together through an in-process
//! relay that plays the part of the messaging gateway.

pub mod fixtures;
pub mod relay;

pub use fixtures::*;
pub use relay::*;
