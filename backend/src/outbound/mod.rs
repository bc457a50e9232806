//! Outbound adapters implementing domain ports.
//!
//! [`persistence`] holds the PostgreSQL adapter; [`memory`] holds the
//! in-process store used when no database is configured.

pub mod memory;
pub mod persistence;
