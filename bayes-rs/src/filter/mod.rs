//! Filter module
//!
//! Text level spam filtering on top of a token statistics store.

pub mod manager;

pub use manager::BayesFilter;
