use std::sync::Arc;

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::daemon::{shutdown_channel, Daemon, DaemonConfig};
use crate::domain::UpdateReport;
use crate::server;
use crate::store::{KvStore, TRENDING_MOVIES_KEY};
use crate::updater::run_update;

pub async fn serve(ctx: Arc<AppContext>, config: &Config, bind: Option<String>, no_schedule: bool) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let mut shutdown = shutdown_channel();

    let scheduler = if config.schedule.enabled && !no_schedule {
        let daemon_config = DaemonConfig::from_schedule(&config.schedule)?;
        let daemon = Daemon::new(ctx.clone(), daemon_config, shutdown.clone());
        Some(tokio::spawn(daemon.run()))
    } else {
        None
    };

    server::serve(ctx, &bind, async move {
        let _ = shutdown.changed().await;
    })
    .await?;

    if let Some(handle) = scheduler {
        if let Err(e) = handle.await {
            tracing::error!("Scheduler task join error: {}", e);
        }
    }

    Ok(())
}

pub async fn update(ctx: &AppContext) -> Result<UpdateReport> {
    let report = match run_update(ctx).await {
        Ok(outcome) => UpdateReport::success(outcome.message(ctx.source.cache_policy()))
            .with_data(outcome.stored)
            .stamped(),
        Err(e) => UpdateReport::failure("Failed to update movies", e).stamped(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report)
}

pub fn show(ctx: &AppContext) -> Result<()> {
    match ctx.store()?.get(TRENDING_MOVIES_KEY)? {
        Some(raw) => println!("{}", raw),
        None => println!("No trending movies cached yet"),
    }
    Ok(())
}

pub async fn schedule(ctx: Arc<AppContext>, config: &Config, interval: Option<String>, no_initial_update: bool) -> Result<()> {
    let mut schedule = config.schedule.clone();
    if let Some(interval) = interval {
        schedule.interval = interval;
    }
    if no_initial_update {
        schedule.update_on_start = false;
    }

    let daemon_config = DaemonConfig::from_schedule(&schedule)?;
    Daemon::new(ctx, daemon_config, shutdown_channel()).run().await;
    Ok(())
}
