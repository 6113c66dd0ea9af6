//! Browser adapters: storage, navigation, task spawning and page reads.
//!
//! Each adapter has a real body behind the `csr` feature and an inert
//! fallback so the crate builds and tests natively.

pub mod dom;
pub mod navigate;
pub mod spawn;
pub mod storage;
