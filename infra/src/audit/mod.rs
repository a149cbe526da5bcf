//! Send-attempt audit logging.
//!
//! The engine hands each send attempt off fire-and-forget; a bounded
//! in-process queue decouples it from the store that actually persists
//! the record. Queue-full and worker-down conditions drop the record -
//! they must never block or fail a lifecycle call.

pub mod queue_logger;
pub mod store;

#[cfg(feature = "mysql-log")]
pub mod mysql_store;

#[cfg(test)]
mod tests;

pub use queue_logger::QueueAuditLogger;
pub use store::{AuditStore, MemoryAuditStore};

#[cfg(feature = "mysql-log")]
pub use mysql_store::MysqlAuditStore;
