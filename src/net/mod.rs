//! Backend access: wire types, the `ChatApi` seam and its browser client.

pub mod api;
pub mod http;
pub mod inflight;
pub mod types;
