//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::domain::ports::{NursesCommand, NursesQuery, WardsCommand, WardsQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub wards_query: Arc<dyn WardsQuery>,
    pub wards_command: Arc<dyn WardsCommand>,
    pub nurses_query: Arc<dyn NursesQuery>,
    pub nurses_command: Arc<dyn NursesCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub wards_query: Arc<dyn WardsQuery>,
    pub wards_command: Arc<dyn WardsCommand>,
    pub nurses_query: Arc<dyn NursesQuery>,
    pub nurses_command: Arc<dyn NursesCommand>,
    /// Civil offset used when rendering timestamps in responses.
    pub display_offset: FixedOffset,
}

impl HttpState {
    /// Construct state from a ports bundle and the display offset.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use chrono::FixedOffset;
    /// use mockable::DefaultClock;
    /// use wardroom::domain::{NurseService, WardService};
    /// use wardroom::inbound::http::state::{HttpState, HttpStatePorts};
    /// use wardroom::outbound::memory::InMemoryStaffStore;
    ///
    /// let store = Arc::new(InMemoryStaffStore::new());
    /// let wards = Arc::new(WardService::new(store.clone(), Arc::new(DefaultClock)));
    /// let nurses = Arc::new(NurseService::new(store, Arc::new(DefaultClock)));
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         wards_query: wards.clone(),
    ///         wards_command: wards,
    ///         nurses_query: nurses.clone(),
    ///         nurses_command: nurses,
    ///     },
    ///     FixedOffset::west_opt(5 * 3600).expect("offset"),
    /// );
    /// let _wards = state.wards_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, display_offset: FixedOffset) -> Self {
        let HttpStatePorts {
            wards_query,
            wards_command,
            nurses_query,
            nurses_command,
        } = ports;
        Self {
            wards_query,
            wards_command,
            nurses_query,
            nurses_command,
            display_offset,
        }
    }

    /// Render a stored instant in the configured civil offset.
    ///
    /// The output keeps the wall-clock instant, so it parses back to the
    /// same UTC value: `2025-03-28T09:30:00-05:00`.
    pub fn display_timestamp(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.display_offset)
            .to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}
