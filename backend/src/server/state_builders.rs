//! Builders for HTTP state ports and repository-backed service pairs.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use wardroom::domain::ports::{NurseRepository, WardRepository};
use wardroom::domain::{NurseService, WardService};
use wardroom::inbound::http::state::{HttpState, HttpStatePorts};
use wardroom::outbound::memory::InMemoryStaffStore;
use wardroom::outbound::persistence::{DieselNurseRepository, DieselWardRepository};

use super::ServerConfig;

/// Wire both services over the given repositories.
///
/// Each service backs its query and command port through one shared `Arc`.
fn ports_from_repositories<W, N>(
    wards: Arc<W>,
    nurses: Arc<N>,
    clock: &Arc<dyn Clock>,
) -> HttpStatePorts
where
    W: WardRepository + 'static,
    N: NurseRepository + 'static,
{
    let ward_service = Arc::new(WardService::new(wards, Arc::clone(clock)));
    let nurse_service = Arc::new(NurseService::new(nurses, Arc::clone(clock)));
    HttpStatePorts {
        wards_query: ward_service.clone(),
        wards_command: ward_service,
        nurses_query: nurse_service.clone(),
        nurses_command: nurse_service,
    }
}

/// Select Diesel repositories when a pool is configured, otherwise one shared
/// in-memory store.
pub fn build_ports(config: &ServerConfig) -> HttpStatePorts {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => ports_from_repositories(
            Arc::new(DieselWardRepository::new(pool.clone())),
            Arc::new(DieselNurseRepository::new(pool.clone())),
            &clock,
        ),
        None => {
            warn!("no database configured; records are kept in memory and lost on restart");
            let store = Arc::new(InMemoryStaffStore::new());
            ports_from_repositories(store.clone(), store, &clock)
        }
    }
}

/// Build the shared HTTP state from configured ports.
pub(super) fn build_http_state(
    config: &ServerConfig,
    ports: HttpStatePorts,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(ports, config.display_offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use rstest::rstest;
    use wardroom::domain::{WardColor, WardDraft, WardName};

    fn memory_config() -> ServerConfig {
        ServerConfig::new(
            "127.0.0.1:0".parse().expect("socket addr"),
            FixedOffset::west_opt(5 * 3600).expect("offset"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn memory_ports_share_one_store() {
        let ports = build_ports(&memory_config());

        let created = ports
            .wards_command
            .create_ward(WardDraft {
                name: WardName::new("Ward 6").expect("name"),
                color: WardColor::Green,
            })
            .await
            .expect("create");
        let fetched = ports.wards_query.get_ward(created.id).await.expect("get");

        assert_eq!(fetched, created);
        assert!(ports.nurses_query.list_nurses().await.expect("list").is_empty());
    }

    #[rstest]
    fn http_state_carries_display_offset() {
        let config = memory_config();
        let state = build_http_state(&config, build_ports(&config));
        assert_eq!(state.display_offset, config.display_offset);
    }
}
