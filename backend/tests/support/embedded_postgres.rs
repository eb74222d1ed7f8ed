//! Embedded PostgreSQL bootstrap for integration tests.
//!
//! One cluster is shared per test binary. Every test gets its own empty
//! database; schema setup is left to the caller so the service's own
//! migration runner is what creates the tables.

use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;
use uuid::Uuid;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Keeps `PG_PASSWORD` stable across processes reusing one data directory.
///
/// The embedded settings otherwise generate a fresh password per call, which
/// no longer matches a cluster initialised by an earlier test binary.
#[expect(
    unsafe_code,
    reason = "edition 2024 requires unsafe for std::env::set_var"
)]
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster spawns any threads, and the shared
        // handle serialises bootstrap behind its own lock.
        unsafe {
            std::env::set_var("PG_PASSWORD", "coupons_embedded_test");
        }
    }
}

/// Start (or reuse) the shared cluster, retrying transient bootstrap errors.
///
/// Must be called outside a Tokio runtime; the bootstrap drives its own.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: bootstrap attempt {attempt} failed: {error:?}");
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// Create an empty database on the shared cluster and return its URL.
pub fn provision_database() -> Result<String, String> {
    let cluster = shared_cluster()?;
    let name = format!("coupons_test_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    Ok(cluster.connection().database_url(&name).to_string())
}
