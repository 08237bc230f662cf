//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::FixedOffset;

use crate::domain::{NurseService, WardService};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStaffStore;
use crate::test_support::fixture_clock;

/// Display offset used by handler tests (UTC-05:00).
pub fn test_offset() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).expect("valid offset")
}

/// State wired to an empty in-memory store and the fixture clock.
pub fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryStaffStore::new());
    let wards = Arc::new(WardService::new(store.clone(), fixture_clock()));
    let nurses = Arc::new(NurseService::new(store, fixture_clock()));
    HttpState::new(
        HttpStatePorts {
            wards_query: wards.clone(),
            wards_command: wards,
            nurses_query: nurses.clone(),
            nurses_command: nurses,
        },
        test_offset(),
    )
}

/// Application serving the `/api` scope over the given state.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(crate::Trace)
        .service(api_scope())
}
