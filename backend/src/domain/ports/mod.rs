//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters. Driving
//! ports (`*Query`, `*Command`) are implemented by the domain services and
//! consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod nurse_repository;
mod nurses_command;
mod nurses_query;
mod ward_repository;
mod wards_command;
mod wards_query;

#[cfg(test)]
pub use nurse_repository::MockNurseRepository;
pub use nurse_repository::{NurseRepository, NurseRepositoryError};
#[cfg(test)]
pub use nurses_command::MockNursesCommand;
pub use nurses_command::NursesCommand;
#[cfg(test)]
pub use nurses_query::MockNursesQuery;
pub use nurses_query::NursesQuery;
#[cfg(test)]
pub use ward_repository::MockWardRepository;
pub use ward_repository::{WardRepository, WardRepositoryError};
#[cfg(test)]
pub use wards_command::MockWardsCommand;
pub use wards_command::WardsCommand;
#[cfg(test)]
pub use wards_query::MockWardsQuery;
pub use wards_query::WardsQuery;
