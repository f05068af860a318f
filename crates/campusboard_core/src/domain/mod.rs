//! Per-view domain configuration.
//!
//! # Responsibility
//! - Describe how one portal list (announcements, lost-and-found, ...) maps
//!   server objects onto records and how it is filtered and ordered.
//! - Ship presets for the built-in portal views.

pub mod config;
