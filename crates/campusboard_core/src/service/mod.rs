//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record sources, payload decoding and the viewer.
//! - Keep rendering/form callers decoupled from I/O failures.

pub mod collection_service;
