//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod nurses;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod wards;

pub use error::ApiResult;

use actix_web::web;

/// Build the `/api` scope with every ward and nurse route registered.
///
/// `check-email` is registered ahead of `/nurses/{id}` so the literal
/// segment is not captured as an id.
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .app_data(validation::json_config())
        .service(wards::list_wards)
        .service(wards::get_ward)
        .service(wards::create_ward)
        .service(wards::update_ward)
        .service(wards::delete_ward)
        .service(nurses::list_nurses)
        .service(nurses::check_email)
        .service(nurses::get_nurse)
        .service(nurses::create_nurse)
        .service(nurses::update_nurse)
        .service(nurses::delete_nurse)
}
