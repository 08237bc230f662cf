//! Ward and nurse administration backend.
//!
//! The domain keeps nurses pointing at existing wards, refuses to delete a
//! ward that still has nurses, and keeps nurse emails unique. Inbound HTTP
//! handlers and outbound stores (PostgreSQL or in-memory) sit at the edges.

pub mod doc;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
