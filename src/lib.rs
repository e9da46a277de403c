//! Core library functions for the vertex reorderer

pub mod apply;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod order;
pub mod permutation;
pub mod pipeline;
pub mod storage;

pub use error::{ReorderError, Result};
