//! Server payload normalization.
//!
//! # Responsibility
//! - Turn raw JSON bodies from the fetch/create collaborators into records.
//!
//! # Invariants
//! - A collection body is accepted whole or rejected whole.

pub mod payload;
