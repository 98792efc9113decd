#![allow(dead_code)] // Each test binary uses a different subset of helpers

pub mod memory_store;
pub mod strategies;

pub use memory_store::*;
