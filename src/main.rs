//! Headless console runner.
//!
//! Wires configuration, the in-memory store (seeded from an optional JSON
//! snapshot file), the live mirrors and the reporting fold together, logs
//! the dashboard summary, and drops a dated CSV export of the orders
//! collection next to the snapshot. The web shell that would normally sit on
//! top of the library is out of scope here.

use dotenvy::dotenv;
use salesdesk::auth::{AuthProvider, Identity, StaticAuth};
use salesdesk::config;
use salesdesk::core::report::{self, Column};
use salesdesk::entities::{DataSource, Role};
use salesdesk::errors::{Error, Result};
use salesdesk::store::{MemoryStore, RemoteStore, new_shared_mirror, run_live_mirror};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()?;

    // 4. Build the store, seeded from the configured snapshot file if any
    let store = Arc::new(MemoryStore::new());
    if let Some(path) = &app_config.console.snapshot_path {
        seed_from_snapshot(&store, path).await?;
    } else {
        warn!("no snapshot_path configured, starting with empty collections");
    }

    // 5. Sign in the demo identity
    let auth = StaticAuth::signed_in(Identity {
        uid: "company".to_string(),
        role: Role::Company,
    });
    if let Some(identity) = auth.current_identity().await {
        info!("signed in as {} ({})", identity.uid, identity.role);
    }

    // 6. Mirror every collection: apply the initial snapshot inline, then
    //    keep following remote changes in the background
    let mirror = new_shared_mirror();
    for source in DataSource::ALL {
        let mut rx = store.subscribe(source).await;
        if let Some(initial) = rx.recv().await {
            mirror.write().await.apply_snapshot(&initial);
        }
        tokio::spawn(run_live_mirror(rx, Arc::clone(&mirror)));
    }

    // 7. Dashboard summary and CSV export
    let today = chrono::Utc::now().date_naive();
    {
        let state = mirror.read().await;
        let summary = report::dashboard_summary(&state);
        info!(
            "dashboard: {} orders, {} trainers, {} products, {} customers",
            summary.orders, summary.trainers, summary.products, summary.customers
        );
        info!(
            "sales: total {:.2}, commissions {:.2}, withdrawals {:.2}",
            summary.sales.total_sales,
            summary.sales.total_commissions,
            summary.sales.total_withdrawals
        );

        let orders = state.records(DataSource::Orders);
        if orders.is_empty() {
            info!("no orders mirrored, skipping export");
        } else {
            let blob = report::export_csv(
                &orders,
                &[
                    Column::Id,
                    Column::Name,
                    Column::Phone,
                    Column::Status,
                    Column::Amount,
                    Column::Date,
                ],
            )?;
            let filename = report::export_filename(&app_config.console.export_prefix, today);
            std::fs::write(&filename, blob)?;
            info!("exported {} order(s) to {}", orders.len(), filename);
        }
    }

    auth.sign_out().await;
    Ok(())
}

/// Seeds every collection found in a JSON snapshot file shaped as
/// `{ "<collection>": { "<key>": { ...fields } } }`.
async fn seed_from_snapshot(store: &MemoryStore, path: &str) -> Result<()> {
    let contents = std::fs::read_to_string(path)?;
    let root: serde_json::Value = serde_json::from_str(&contents)?;
    let serde_json::Value::Object(collections) = root else {
        return Err(Error::Config {
            message: format!("snapshot {path} is not a JSON object"),
        });
    };

    for (name, raw) in collections {
        match DataSource::parse(&name) {
            Some(source) => store.seed(source, raw).await,
            None => warn!("snapshot {} names unknown collection {}", path, name),
        }
    }
    info!("seeded store from {}", path);
    Ok(())
}
