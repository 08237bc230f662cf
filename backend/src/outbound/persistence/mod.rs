//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the ward and nurse repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) are
//!   internal and never reach the domain.
//! - Consistency checks run inside the same transaction as the write they
//!   guard; constraint failures raised by the store are classified into the
//!   same domain violations.
//!
//! # Example
//!
//! ```rust,no_run
//! use wardroom::outbound::persistence::{DbPool, DieselWardRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/wardroom")).await?;
//! let wards = DieselWardRepository::new(pool);
//! # let _ = wards;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_nurse_repository;
mod diesel_ward_repository;
pub mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_nurse_repository::DieselNurseRepository;
pub use diesel_ward_repository::DieselWardRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
