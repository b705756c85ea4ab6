//! Taskdeck: core of a personal project-management dashboard.
//!
//! The crate provides the two coordination-heavy parts of the dashboard:
//! a client-side request cache and the task lifecycle with its activity log.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP, etc.)
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`cache`]: Stale-while-revalidate request cache with request coalescing
//! - [`task`]: Task lifecycle, activity log and dashboard views
//! - [`secrets`]: Encryption collaborator with fail-soft decryption
//! - [`config`]: Environment-driven configuration

pub mod cache;
pub mod config;
pub mod secrets;
pub mod task;
