//! Nurse HTTP handlers.
//!
//! ```text
//! GET    /api/nurses
//! GET    /api/nurses/check-email?email=ann.lee@x.com
//! GET    /api/nurses/{id}
//! POST   /api/nurses       {"firstName":"Ann","lastName":"Lee","email":"ann.lee@x.com","wardId":6}
//! PUT    /api/nurses/{id}
//! DELETE /api/nurses/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{EmailAddress, Error, NurseDraft, NurseView, PersonName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, nurse_field_error, parse_nurse_path_id, parse_ward_ref, require,
};

const FIRST_NAME_FIELD: FieldName = FieldName::new("firstName");
const LAST_NAME_FIELD: FieldName = FieldName::new("lastName");
const EMAIL_FIELD: FieldName = FieldName::new("email");
const WARD_ID_FIELD: FieldName = FieldName::new("wardId");

/// Request body for creating or replacing a nurse.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NurseRequest {
    #[schema(example = "Ann")]
    pub first_name: Option<String>,
    #[schema(example = "Lee")]
    pub last_name: Option<String>,
    #[schema(example = "ann.lee@x.com")]
    pub email: Option<String>,
    #[schema(example = 6)]
    pub ward_id: Option<i64>,
}

/// Nurse record enriched with derived display fields.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NurseResponse {
    pub id: i32,
    /// Ten-character identifier issued at creation and never changed.
    #[schema(example = "V1StGXR8_Z")]
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "Ann Lee")]
    pub full_name: String,
    pub email: String,
    pub ward_id: i32,
    /// Name of the assigned ward, or `Unknown` when it cannot be resolved.
    #[schema(example = "Ward 6")]
    pub ward_name: String,
    #[schema(example = "2025-03-28T09:30:00-05:00")]
    pub created_at: String,
    pub modified_at: String,
}

/// Body returned after a successful delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NurseDeletedResponse {
    #[schema(example = "Nurse deleted successfully")]
    pub message: String,
    pub nurse: NurseResponse,
}

/// Query string for the advisory email check.
#[derive(Debug, Deserialize, IntoParams)]
pub struct CheckEmailQuery {
    /// Address to look up; compared exactly as stored.
    pub email: Option<String>,
}

/// Result of the advisory email check.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmailExistsResponse {
    pub exists: bool,
}

impl NurseResponse {
    fn render(view: NurseView, state: &HttpState) -> Self {
        let ward_name = view.ward_name().to_owned();
        let full_name = view.nurse.full_name();
        let nurse = view.nurse;
        Self {
            id: nurse.id.as_i32(),
            employee_id: nurse.employee_id.to_string(),
            first_name: nurse.first_name.to_string(),
            last_name: nurse.last_name.to_string(),
            full_name,
            email: nurse.email.to_string(),
            ward_id: nurse.ward_id.as_i32(),
            ward_name,
            created_at: state.display_timestamp(nurse.created_at),
            modified_at: state.display_timestamp(nurse.modified_at),
        }
    }
}

fn parse_person_name(value: &str, field: FieldName) -> Result<PersonName, Error> {
    PersonName::new(value).map_err(|err| nurse_field_error(&err, field, value))
}

fn parse_nurse_request(payload: NurseRequest) -> Result<NurseDraft, Error> {
    let first_name = require(payload.first_name, FIRST_NAME_FIELD)?;
    let last_name = require(payload.last_name, LAST_NAME_FIELD)?;
    let email = require(payload.email, EMAIL_FIELD)?;
    let ward_id = require(payload.ward_id, WARD_ID_FIELD)?;

    Ok(NurseDraft {
        first_name: parse_person_name(&first_name, FIRST_NAME_FIELD)?,
        last_name: parse_person_name(&last_name, LAST_NAME_FIELD)?,
        email: EmailAddress::new(email.as_str())
            .map_err(|err| nurse_field_error(&err, EMAIL_FIELD, &email))?,
        ward_id: parse_ward_ref(ward_id, WARD_ID_FIELD)?,
    })
}

/// List every nurse with `full_name` and `ward_name`, ordered by id.
#[utoipa::path(
    get,
    path = "/api/nurses",
    responses(
        (status = 200, description = "Nurses", body = [NurseResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["nurses"],
    operation_id = "listNurses"
)]
#[get("/nurses")]
pub async fn list_nurses(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<NurseResponse>>> {
    let nurses = state.nurses_query.list_nurses().await?;
    Ok(web::Json(
        nurses
            .into_iter()
            .map(|view| NurseResponse::render(view, &state))
            .collect(),
    ))
}

/// Advisory pre-flight check used by forms before submitting.
///
/// The unique constraint on create and update remains authoritative. A
/// string that is not a well-formed address cannot belong to any nurse, so
/// it reports `false` rather than failing.
#[utoipa::path(
    get,
    path = "/api/nurses/check-email",
    params(CheckEmailQuery),
    responses(
        (status = 200, description = "Whether a nurse already uses the email", body = EmailExistsResponse),
        (status = 400, description = "Missing email parameter", body = ErrorSchema)
    ),
    tags = ["nurses"],
    operation_id = "checkNurseEmail"
)]
#[get("/nurses/check-email")]
pub async fn check_email(
    state: web::Data<HttpState>,
    query: web::Query<CheckEmailQuery>,
) -> ApiResult<web::Json<EmailExistsResponse>> {
    let raw = require(query.into_inner().email, EMAIL_FIELD)?;
    let exists = match EmailAddress::new(raw) {
        Ok(email) => state.nurses_query.email_exists(&email).await?,
        Err(_) => false,
    };
    Ok(web::Json(EmailExistsResponse { exists }))
}

/// Fetch one nurse with the same derived fields as the list.
#[utoipa::path(
    get,
    path = "/api/nurses/{id}",
    params(("id" = i32, Path, description = "Nurse identifier")),
    responses(
        (status = 200, description = "Nurse", body = NurseResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Nurse not found", body = ErrorSchema)
    ),
    tags = ["nurses"],
    operation_id = "getNurse"
)]
#[get("/nurses/{id}")]
pub async fn get_nurse(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NurseResponse>> {
    let id = parse_nurse_path_id(&path)?;
    let view = state.nurses_query.get_nurse(id).await?;
    Ok(web::Json(NurseResponse::render(view, &state)))
}

/// Create a nurse and issue a fresh employee id.
#[utoipa::path(
    post,
    path = "/api/nurses",
    request_body = NurseRequest,
    responses(
        (status = 201, description = "Nurse created", body = NurseResponse),
        (status = 400, description = "Invalid request or unknown ward", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema)
    ),
    tags = ["nurses"],
    operation_id = "createNurse"
)]
#[post("/nurses")]
pub async fn create_nurse(
    state: web::Data<HttpState>,
    payload: web::Json<NurseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_nurse_request(payload.into_inner())?;
    let view = state.nurses_command.create_nurse(draft).await?;
    Ok(HttpResponse::Created().json(NurseResponse::render(view, &state)))
}

/// Replace a nurse's mutable fields. The employee id is kept.
#[utoipa::path(
    put,
    path = "/api/nurses/{id}",
    params(("id" = i32, Path, description = "Nurse identifier")),
    request_body = NurseRequest,
    responses(
        (status = 200, description = "Nurse updated", body = NurseResponse),
        (status = 400, description = "Invalid request or unknown ward", body = ErrorSchema),
        (status = 404, description = "Nurse not found", body = ErrorSchema),
        (status = 409, description = "Email belongs to another nurse", body = ErrorSchema)
    ),
    tags = ["nurses"],
    operation_id = "updateNurse"
)]
#[put("/nurses/{id}")]
pub async fn update_nurse(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<NurseRequest>,
) -> ApiResult<web::Json<NurseResponse>> {
    let id = parse_nurse_path_id(&path)?;
    let draft = parse_nurse_request(payload.into_inner())?;
    let view = state.nurses_command.update_nurse(id, draft).await?;
    Ok(web::Json(NurseResponse::render(view, &state)))
}

/// Delete a nurse.
#[utoipa::path(
    delete,
    path = "/api/nurses/{id}",
    params(("id" = i32, Path, description = "Nurse identifier")),
    responses(
        (status = 200, description = "Nurse deleted", body = NurseDeletedResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Nurse not found", body = ErrorSchema)
    ),
    tags = ["nurses"],
    operation_id = "deleteNurse"
)]
#[delete("/nurses/{id}")]
pub async fn delete_nurse(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NurseDeletedResponse>> {
    let id = parse_nurse_path_id(&path)?;
    let view = state.nurses_command.delete_nurse(id).await?;
    Ok(web::Json(NurseDeletedResponse {
        message: "Nurse deleted successfully".to_owned(),
        nurse: NurseResponse::render(view, &state),
    }))
}

#[cfg(test)]
#[path = "nurses_tests.rs"]
mod tests;
