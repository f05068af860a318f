//! Display record model shared by every portal list view.
//!
//! # Responsibility
//! - Define the canonical record shape consumed by the collection viewer.
//! - Keep domain differences (announcements, lost-and-found, ...) out of the
//!   record type itself; those live in `DomainConfig`.
//!
//! # Invariants
//! - Records are immutable once handed to the viewer.
//! - `id` is assigned by the remote store and never rewritten in core.

pub mod record;
