//! Scheduled trigger for automatic chart updates.
//!
//! Runs the same update flow as `GET /` on a fixed interval, independent of
//! HTTP traffic, until a shutdown is signalled.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::interval;

use crate::app::{AppContext, MarqueeError, Result};
use crate::config::ScheduleConfig;
use crate::domain::UpdateReport;
use crate::updater::scheduled_update;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Update interval in seconds (default: 86400 = 1 day)
    pub update_interval_secs: u64,
    /// Whether to run an update immediately on start
    pub update_on_start: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: 86400,
            update_on_start: false,
        }
    }
}

impl DaemonConfig {
    pub fn from_schedule(schedule: &ScheduleConfig) -> Result<Self> {
        let update_interval_secs =
            Self::parse_interval(&schedule.interval).map_err(MarqueeError::Config)?;

        Ok(Self {
            update_interval_secs,
            update_on_start: schedule.update_on_start,
        })
    }

    /// Parse interval string like "1h", "30m", "6h", "1d"
    pub fn parse_interval(s: &str) -> std::result::Result<u64, String> {
        let s = s.trim().to_lowercase();

        let (count, scale) = if let Some(hours) = s.strip_suffix('h') {
            (hours, 3600)
        } else if let Some(minutes) = s.strip_suffix('m') {
            (minutes, 60)
        } else if let Some(days) = s.strip_suffix('d') {
            (days, 86400)
        } else if let Some(secs) = s.strip_suffix('s') {
            (secs, 1)
        } else {
            (s.as_str(), 1)
        };

        let secs = count
            .parse::<u64>()
            .map_err(|_| format!("Invalid interval: {}. Use format like '1h', '30m', '1d'", s))?
            .checked_mul(scale)
            .ok_or_else(|| format!("Interval too large: {}", s))?;
        if secs == 0 {
            return Err("Interval must be greater than zero".to_string());
        }

        Ok(secs)
    }

    /// Format interval for display
    pub fn format_interval(secs: u64) -> String {
        if secs >= 86400 && secs.is_multiple_of(86400) {
            format!("{}d", secs / 86400)
        } else if secs >= 3600 && secs.is_multiple_of(3600) {
            format!("{}h", secs / 3600)
        } else if secs >= 60 && secs.is_multiple_of(60) {
            format!("{}m", secs / 60)
        } else {
            format!("{}s", secs)
        }
    }
}

/// Daemon runner
pub struct Daemon {
    ctx: Arc<AppContext>,
    config: DaemonConfig,
    shutdown: watch::Receiver<bool>,
}

impl Daemon {
    pub fn new(ctx: Arc<AppContext>, config: DaemonConfig, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            ctx,
            config,
            shutdown,
        }
    }

    /// Run until the shutdown channel flips or its sender is dropped.
    ///
    /// Returns the report of the last update that ran, if any.
    pub async fn run(self) -> Option<UpdateReport> {
        tracing::info!(
            "Scheduler started for {} (update interval: {})",
            self.ctx.source,
            DaemonConfig::format_interval(self.config.update_interval_secs)
        );

        let mut shutdown = self.shutdown.clone();
        let mut last = None;

        if self.config.update_on_start {
            tracing::info!("Running initial update...");
            last = Some(self.run_update().await);
        }

        let mut timer = interval(Duration::from_secs(self.config.update_interval_secs));
        timer.tick().await; // Skip the first immediate tick

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    tracing::info!("Running scheduled update...");
                    last = Some(self.run_update().await);
                }
                _ = shutdown.changed() => break,
            }
        }

        tracing::info!("Scheduler shutting down...");
        last
    }

    /// Run a single update cycle
    async fn run_update(&self) -> UpdateReport {
        let start = Utc::now();
        let report = scheduled_update(&self.ctx).await;
        let elapsed = Utc::now().signed_duration_since(start);

        if report.success {
            tracing::info!(
                "{} ({:.1}s)",
                report.message,
                elapsed.num_milliseconds() as f64 / 1000.0
            );
        } else {
            tracing::error!(
                "{}: {}",
                report.message,
                report.error.as_deref().unwrap_or("unknown error")
            );
        }

        report
    }
}

/// Resolve on SIGINT or SIGTERM (Ctrl-C elsewhere).
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to set up SIGTERM handler");
        let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
            .expect("Failed to set up SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// A shutdown channel flipped by [`shutdown_signal`].
pub fn shutdown_channel() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = tx.send(true);
    });
    rx
}
