//! One embedded PostgreSQL cluster per test binary.
//!
//! The cluster handle is leaked by `pg-embed-setup-unpriv` and lives for the
//! rest of the process. Bootstrap can fail transiently while binaries are
//! downloaded, so it is retried a few times.

use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Fetch the process-wide cluster, bootstrapping it on first use.
pub fn shared_cluster_handle() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) => {
                if attempt >= SHARED_CLUSTER_RETRIES {
                    return Err(format!(
                        "shared cluster: attempt {attempt}/{SHARED_CLUSTER_RETRIES}: {error:?}"
                    ));
                }
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}
