use anyhow::Result;
use clap::Parser;
use larder::{App, cli::Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = larder::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    larder::observability::init_observability(
        "larder",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let mut app = App::connect(config).await?;

    let mut stdout = std::io::stdout().lock();
    let result = larder::cli::run(&mut app, cli.command, &mut stdout).await;

    app.flush_notices(&mut std::io::stderr().lock())?;

    result
}
