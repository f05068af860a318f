//! Collaborator seams for fetching and creating records.
//!
//! # Responsibility
//! - Carry session credentials explicitly to whichever source performs I/O.
//! - Define the record source contract and a file-backed implementation.
//!
//! # Invariants
//! - Sources return raw bodies; decoding stays in `ingest`.
//! - Credentials never appear in `Debug` output or log events.

pub mod draft;
pub mod record_source;
pub mod session;
