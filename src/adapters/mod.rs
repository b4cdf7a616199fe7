//! Adapters - implementations of ports and the outward HTTP surface.

pub mod ai;
pub mod http;
