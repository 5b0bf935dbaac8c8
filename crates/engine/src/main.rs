//! Zoo Engine - demo entry point.
//!
//! Builds an in-memory zoo, optionally seeds it, walks through a transfer and
//! a feeding, and logs the resulting statistics.

use std::sync::Arc;

use chrono::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zoo_engine::infrastructure::{clock::SystemClock, config::ZooConfig, ports::ClockPort};
use zoo_engine::{seed, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zoo_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Zoo Engine");

    let config = ZooConfig::from_env();
    tracing::info!(
        utc_offset = %config.utc_offset,
        seed_demo = config.seed_demo,
        "Configuration loaded"
    );

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let app = App::in_memory(clock, config);

    if !config.seed_demo {
        tracing::info!("Demo seeding disabled, nothing to do");
        return Ok(());
    }

    let zoo = seed::seed_demo(&app).await?;

    // The den holds one animal, so Rajah is turned away while Simba lives there.
    let moved = app
        .use_cases
        .transfer
        .transfer_animal(zoo.rajah, zoo.lion_den)
        .await?;
    tracing::info!(moved, "Rajah into the lion den");

    // A zebra never goes into a predator enclosure.
    let moved = app
        .use_cases
        .transfer
        .transfer_animal(zoo.marty, zoo.lion_den)
        .await?;
    tracing::info!(moved, "Marty into the lion den");

    app.use_cases.transfer.remove_from_enclosure(zoo.simba).await?;
    let moved = app
        .use_cases
        .transfer
        .transfer_animal(zoo.rajah, zoo.lion_den)
        .await?;
    tracing::info!(moved, "Rajah into the emptied lion den");

    let now = app.clock.local_now();
    app.use_cases
        .feeding
        .schedule_feeding(zoo.blu, "Seeds", now.time(), now.date_naive())
        .await?;
    let later = now + Duration::hours(3);
    app.use_cases
        .feeding
        .schedule_feeding(zoo.marty, "Hay", later.time(), later.date_naive())
        .await?;

    let today = app.use_cases.feeding.get_today_feeding_schedules().await?;
    tracing::info!(count = today.len(), "Feedings planned for today");

    let stats = app.use_cases.statistics.snapshot().await?;
    tracing::info!(stats = %serde_json::to_string(&stats)?, "Zoo statistics");

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
