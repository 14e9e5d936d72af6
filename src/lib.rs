// Cachewrap library
//
// A validated convenience facade over a standalone or sharded Redis
// deployment. Sharding, pooling of the underlying transport, and the wire
// protocol all belong to the redis crate; this crate adds argument
// validation, lease discipline, and a few absence normalizations.

pub mod config;
pub mod error;
pub mod facade;
pub mod logging;
pub mod pool;
