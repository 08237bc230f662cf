//! Ward HTTP handlers.
//!
//! ```text
//! GET    /api/wards
//! GET    /api/wards/{id}
//! POST   /api/wards       {"name":"Ward 6","color":"Green"}
//! PUT    /api/wards/{id}  {"name":"Ward 6","color":"Blue"}
//! DELETE /api/wards/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Ward, WardColor, WardDraft, WardName, WardSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_ward_path_id, require, ward_field_error,
};

const NAME_FIELD: FieldName = FieldName::new("name");
const COLOR_FIELD: FieldName = FieldName::new("color");

/// Request body for creating or replacing a ward.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct WardRequest {
    #[schema(example = "Ward 6")]
    pub name: Option<String>,
    /// One of `Red`, `Green`, `Blue`, `Yellow`.
    #[schema(example = "Green")]
    pub color: Option<String>,
}

/// Ward record as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WardResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
    /// Creation time in the configured display offset.
    #[schema(example = "2025-03-28T09:30:00-05:00")]
    pub created_at: String,
    pub modified_at: String,
}

/// Ward list entry carrying the dependent-nurse flag.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WardListItem {
    #[serde(flatten)]
    pub ward: WardResponse,
    #[serde(rename = "hasNurses")]
    pub has_nurses: bool,
}

/// Body returned after a successful delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WardDeletedResponse {
    #[schema(example = "Ward deleted successfully")]
    pub message: String,
    pub ward: WardResponse,
}

impl WardResponse {
    fn render(ward: Ward, state: &HttpState) -> Self {
        Self {
            id: ward.id.as_i32(),
            name: ward.name.to_string(),
            color: ward.color.to_string(),
            created_at: state.display_timestamp(ward.created_at),
            modified_at: state.display_timestamp(ward.modified_at),
        }
    }
}

impl WardListItem {
    fn render(summary: WardSummary, state: &HttpState) -> Self {
        Self {
            ward: WardResponse::render(summary.ward, state),
            has_nurses: summary.has_nurses,
        }
    }
}

fn parse_ward_request(payload: WardRequest) -> Result<WardDraft, Error> {
    let name = require(payload.name, NAME_FIELD)?;
    let color = require(payload.color, COLOR_FIELD)?;

    let name = WardName::new(name.as_str())
        .map_err(|err| ward_field_error(&err, NAME_FIELD, &name))?;
    let color = color
        .parse::<WardColor>()
        .map_err(|err| ward_field_error(&err, COLOR_FIELD, &color))?;
    Ok(WardDraft { name, color })
}

/// List every ward with its `hasNurses` flag, ordered by id.
#[utoipa::path(
    get,
    path = "/api/wards",
    responses(
        (status = 200, description = "Wards", body = [WardListItem]),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["wards"],
    operation_id = "listWards"
)]
#[get("/wards")]
pub async fn list_wards(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<WardListItem>>> {
    let wards = state.wards_query.list_wards().await?;
    Ok(web::Json(
        wards
            .into_iter()
            .map(|summary| WardListItem::render(summary, &state))
            .collect(),
    ))
}

/// Fetch one ward.
#[utoipa::path(
    get,
    path = "/api/wards/{id}",
    params(("id" = i32, Path, description = "Ward identifier")),
    responses(
        (status = 200, description = "Ward", body = WardResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Ward not found", body = ErrorSchema)
    ),
    tags = ["wards"],
    operation_id = "getWard"
)]
#[get("/wards/{id}")]
pub async fn get_ward(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<WardResponse>> {
    let id = parse_ward_path_id(&path)?;
    let ward = state.wards_query.get_ward(id).await?;
    Ok(web::Json(WardResponse::render(ward, &state)))
}

/// Create a ward.
#[utoipa::path(
    post,
    path = "/api/wards",
    request_body = WardRequest,
    responses(
        (status = 201, description = "Ward created", body = WardResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["wards"],
    operation_id = "createWard"
)]
#[post("/wards")]
pub async fn create_ward(
    state: web::Data<HttpState>,
    payload: web::Json<WardRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_ward_request(payload.into_inner())?;
    let ward = state.wards_command.create_ward(draft).await?;
    Ok(HttpResponse::Created().json(WardResponse::render(ward, &state)))
}

/// Replace a ward's name and color.
#[utoipa::path(
    put,
    path = "/api/wards/{id}",
    params(("id" = i32, Path, description = "Ward identifier")),
    request_body = WardRequest,
    responses(
        (status = 200, description = "Ward updated", body = WardResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Ward not found", body = ErrorSchema)
    ),
    tags = ["wards"],
    operation_id = "updateWard"
)]
#[put("/wards/{id}")]
pub async fn update_ward(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<WardRequest>,
) -> ApiResult<web::Json<WardResponse>> {
    let id = parse_ward_path_id(&path)?;
    let draft = parse_ward_request(payload.into_inner())?;
    let ward = state.wards_command.update_ward(id, draft).await?;
    Ok(web::Json(WardResponse::render(ward, &state)))
}

/// Delete a ward that no nurse references.
#[utoipa::path(
    delete,
    path = "/api/wards/{id}",
    params(("id" = i32, Path, description = "Ward identifier")),
    responses(
        (status = 200, description = "Ward deleted", body = WardDeletedResponse),
        (
            status = 400,
            description = "Invalid id, or nurses are still assigned (`dependents_exist`)",
            body = ErrorSchema
        ),
        (status = 404, description = "Ward not found", body = ErrorSchema)
    ),
    tags = ["wards"],
    operation_id = "deleteWard"
)]
#[delete("/wards/{id}")]
pub async fn delete_ward(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<WardDeletedResponse>> {
    let id = parse_ward_path_id(&path)?;
    let ward = state.wards_command.delete_ward(id).await?;
    Ok(web::Json(WardDeletedResponse {
        message: "Ward deleted successfully".to_owned(),
        ward: WardResponse::render(ward, &state),
    }))
}

#[cfg(test)]
#[path = "wards_tests.rs"]
mod tests;
