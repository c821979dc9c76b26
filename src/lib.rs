pub mod config;
pub mod server;
pub mod table;
pub mod wire;

use config::DebugToggles;

/// entry point usable both from `main` and from integration tests.
pub async fn router_main(local_address: &str) -> anyhow::Result<()> {
    server::bootstrap(local_address, DebugToggles::from_env()).await
}
