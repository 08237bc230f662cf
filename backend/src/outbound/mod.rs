//! Outbound adapters implementing the domain repository ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//! - **memory**: in-process store used when no database is configured.
//!
//! Adapters translate between domain types and storage representations and
//! gather the facts the consistency rules need. They make no decisions of
//! their own.

pub mod memory;
pub mod persistence;
