#![doc = include_str!("../README.md")]

pub mod metric;

mod error;
mod node;
mod ord_items;
mod search;
mod sized_heap;
mod tree;
mod utils;

pub use error::GnatError;
pub use metric::{Metric, ParMetric};
pub use sized_heap::SizedHeap;
pub use tree::{Gnat, GnatConfig, Items};

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";
