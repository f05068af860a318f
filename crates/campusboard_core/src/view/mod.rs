//! Record collection viewer.
//!
//! # Responsibility
//! - Hold the working set of records for one portal list.
//! - Derive the presentation: filtered + ordered items and tab counts.
//!
//! # Invariants
//! - Every operation is total: no errors, no panics on empty or odd input.
//! - The stored collection keeps source order; presentation order is always
//!   recomputed and never written back.

pub mod counts;
pub mod filter;
pub mod sort;
pub mod viewer;
