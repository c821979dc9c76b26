#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use rip::config::{Cli, LogLevel};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    simple_logger::init_with_level(LogLevel::default().as_level())?;
    rip::router_main(&cli.local_address).await
}
