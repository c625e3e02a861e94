use anyhow::Context;
use concierge_app::service::{shutdown_signal, Service};
use concierge_kernel::{ServiceKind, Settings};
use tokio::sync::watch;

/// Runs both services in one process, hotel service first.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Concierge settings")?;
    concierge_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        hotel_directory = %settings.hotel_directory.base_url,
        "concierge-app bootstrap starting"
    );

    let (stop_tx, stop_rx) = watch::channel(false);
    let mut services = tokio::task::JoinSet::new();

    for kind in ServiceKind::ALL {
        let service = Service::from_settings(kind, &settings)?;
        let settings = settings.clone();
        let mut stop_rx = stop_rx.clone();
        services.spawn(async move {
            let shutdown = async move {
                let _ = stop_rx.wait_for(|stop| *stop).await;
            };
            service.run(&settings, shutdown).await
        });
    }

    tokio::select! {
        _ = shutdown_signal() => {}
        Some(finished) = services.join_next() => {
            tracing::error!("a service exited before shutdown was requested");
            let _ = stop_tx.send(true);
            finished.context("service task panicked")??;
        }
    }

    let _ = stop_tx.send(true);
    while let Some(finished) = services.join_next().await {
        finished.context("service task panicked")??;
    }

    tracing::info!("concierge-app stopped");
    Ok(())
}
