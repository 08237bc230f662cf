//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every ward, nurse, and health endpoint together with
//! the request/response DTOs and the error schema wrappers
//! ([`ErrorSchema`], [`ErrorCodeSchema`]) that describe domain errors without
//! coupling the domain to utoipa.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::nurses::{
    EmailExistsResponse, NurseDeletedResponse, NurseRequest, NurseResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::wards::{
    WardDeletedResponse, WardListItem, WardRequest, WardResponse,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wardroom API",
        description = "Ward and nurse administration with referential integrity."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::wards::list_wards,
        crate::inbound::http::wards::get_ward,
        crate::inbound::http::wards::create_ward,
        crate::inbound::http::wards::update_ward,
        crate::inbound::http::wards::delete_ward,
        crate::inbound::http::nurses::list_nurses,
        crate::inbound::http::nurses::check_email,
        crate::inbound::http::nurses::get_nurse,
        crate::inbound::http::nurses::create_nurse,
        crate::inbound::http::nurses::update_nurse,
        crate::inbound::http::nurses::delete_nurse,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        WardRequest,
        WardResponse,
        WardListItem,
        WardDeletedResponse,
        NurseRequest,
        NurseResponse,
        NurseDeletedResponse,
        EmailExistsResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "wards", description = "Ward records"),
        (name = "nurses", description = "Nurse records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
