//! Step definitions for task activity log scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
