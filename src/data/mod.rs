//! Data loading and serialization module

pub mod edge_list;

pub use edge_list::{load_edge_list, read_edge_list, write_edge_list, write_pairs};
