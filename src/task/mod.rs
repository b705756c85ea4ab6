//! Task lifecycle management.
//!
//! Tasks move freely between statuses; each mutation derives the completion
//! timestamp and appends activity log entries (`TASK_CREATED`,
//! `STATUS_CHANGED`, `COMPLETED`, `REOPENED`, `DESCRIPTION_UPDATED`). The
//! module follows hexagonal architecture:
//!
//! - Domain types and pure read-side views in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
