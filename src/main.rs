use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use marquee::app::AppContext;
use marquee::cli::{commands, Cli, Commands};
use marquee::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.source = source;
    }

    let ctx = Arc::new(AppContext::new(&config)?);

    match cli.command {
        Commands::Serve { bind, no_schedule } => {
            commands::serve(ctx, &config, bind, no_schedule).await?;
        }
        Commands::Update => {
            let report = commands::update(&ctx).await?;
            if !report.success {
                std::process::exit(1);
            }
        }
        Commands::Show => {
            commands::show(&ctx)?;
        }
        Commands::Schedule {
            interval,
            no_initial_update,
        } => {
            commands::schedule(ctx, &config, interval, no_initial_update).await?;
        }
    }

    Ok(())
}
