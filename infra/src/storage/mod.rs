//! Code storage adapters.
//!
//! Both adapters implement the core `CodeStorage` port: one `Code` per
//! key, passive expiry, no history. The Redis store is the production
//! backend; the in-memory store serves tests and development.

pub mod memory;

#[cfg(feature = "redis-storage")]
pub mod redis;

#[cfg(test)]
mod tests;

pub use memory::MemoryStorage;

#[cfg(feature = "redis-storage")]
pub use redis::RedisStorage;
