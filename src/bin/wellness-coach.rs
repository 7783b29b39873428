// ABOUTME: Command-line entry point for snapshots, health data sync and coach chat
// ABOUTME: Wires configuration, logging, the synthetic health source, stores and the chat backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

//! # Wellness Coach Binary
//!
//! ```text
//! wellness-coach snapshot [--date YYYY-MM-DD]
//! wellness-coach sync [--once] [--date YYYY-MM-DD] [--dry-run]
//! wellness-coach chat <MESSAGE> [--with-health] [--date YYYY-MM-DD]
//! ```
//!
//! Health data comes from the synthetic source, loaded from `WELLNESS_HEALTH_FIXTURE`
//! when set.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use wellness_coach::{
    chat::{ChatController, HealthAttachment, HttpChatBackend, SessionContext},
    config::AppConfig,
    logging,
    snapshot::SnapshotBuilder,
    store::{DocumentStore, FirestoreStore, InMemoryDocumentStore},
    sync::{ExistingJobPolicy, JobScheduler, SyncJob},
    utils::http_client::create_client_with_timeout,
};
use wellness_providers::{HealthDataSource, SyntheticHealthSource};

#[derive(Parser)]
#[command(name = "wellness-coach")]
#[command(about = "Wellness Coach - daily health snapshots, cloud sync and AI coach chat")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the health snapshot of a date as JSON
    Snapshot {
        /// Date to read (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Upload health snapshots to the document store
    Sync {
        /// Upload once and exit instead of running the periodic job
        #[arg(long)]
        once: bool,
        /// Date to upload with --once (defaults to today)
        #[arg(long, requires = "once")]
        date: Option<NaiveDate>,
        /// Write to an in-memory store instead of Firestore
        #[arg(long)]
        dry_run: bool,
    },
    /// Send one message to the AI coach
    Chat {
        /// Message text
        message: String,
        /// Attach the health snapshot of --date (or today)
        #[arg(long)]
        with_health: bool,
        /// Date of the attached snapshot
        #[arg(long, requires = "with_health")]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;
    let config = AppConfig::from_env()?;
    info!("{}", config.summary());

    let source = health_source(&config)?;
    let builder = SnapshotBuilder::new(source);
    let today = Local::now().date_naive();

    match args.command {
        Command::Snapshot { date } => {
            let snapshot = builder.build_snapshot(date.unwrap_or(today)).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Sync {
            once,
            date,
            dry_run,
        } => {
            let store = document_store(&config, dry_run)?;
            let job = SyncJob::new(config.user_id.clone(), builder, store);
            if once {
                let report = job.run_for(date.unwrap_or(today)).await?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                run_scheduler(job, &config).await?;
            }
        }
        Command::Chat {
            message,
            with_health,
            date,
        } => {
            let backend = Arc::new(HttpChatBackend::from_config(&config)?);
            let controller = ChatController::new(SessionContext::new(config.user_id.clone()), backend)
                .with_snapshots(builder);
            let attachment = if with_health {
                HealthAttachment::ForDate(date.unwrap_or(today))
            } else {
                HealthAttachment::None
            };

            let reply = controller.send_message(&message, attachment).await?;
            println!("{}", reply.message.text);
            if let Some(notification) = &reply.notification {
                println!("[{}] {}", notification.title, notification.body);
            }
            if !reply.is_delivered() {
                bail!("chat backend did not answer");
            }
        }
    }

    Ok(())
}

fn health_source(config: &AppConfig) -> Result<Arc<dyn HealthDataSource>> {
    let source = match &config.health_fixture {
        Some(path) => SyntheticHealthSource::from_fixture_file(path)
            .with_context(|| format!("loading health fixture {}", path.display()))?,
        None => {
            warn!("No health fixture configured, serving an empty dataset");
            SyntheticHealthSource::new()
        }
    };
    Ok(Arc::new(source))
}

fn document_store(config: &AppConfig, dry_run: bool) -> Result<Arc<dyn DocumentStore>> {
    if dry_run {
        info!("Dry run: writing to an in-memory store");
        return Ok(Arc::new(InMemoryDocumentStore::new()));
    }
    let client = create_client_with_timeout(config.http_timeout.as_secs());
    Ok(Arc::new(FirestoreStore::from_config(&config.firestore, client)?))
}

async fn run_scheduler(job: SyncJob, config: &AppConfig) -> Result<()> {
    let scheduler = JobScheduler::new();
    let registration =
        scheduler.register_periodic(Arc::new(job), config.sync.interval, ExistingJobPolicy::Keep);
    info!(?registration, "Periodic sync running, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("waiting for Ctrl-C")?;

    scheduler.shutdown();
    info!("Periodic sync stopped");
    Ok(())
}
