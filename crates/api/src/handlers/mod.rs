pub mod squads;

/// Liveness probe.  Never touches the store.
pub async fn health() -> &'static str {
    "OK"
}
