use anyhow::Context;
use std::{path::PathBuf, time::Duration};
use toast_notifications::{
    Event, InteractionSource, NotificationOptions, PushRequest, ReceiverConfig, Receivers,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    color_backtrace::install();
    init_logging();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ReceiverConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ReceiverConfig::default(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(demo(config))
}

fn init_logging() {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(feature = "systemd")]
    if let Ok(journal_layer) = tracing_journald::layer() {
        tracing_subscriber::registry()
            .with(journal_layer)
            .with(filter_layer)
            .init();
        return;
    }

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter_layer)
        .init();
}

/// Walk one receiver through pushes, a promise and a hover.
async fn demo(config: ReceiverConfig) -> anyhow::Result<()> {
    let mut receivers = Receivers::new();
    let notifier = receivers.spawn("main", config);
    let mut events = notifier.events();

    let log_events = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::Closed { id, reason } => tracing::info!("{} closed ({:?})", id, reason),
                event => tracing::info!("{:?}", event),
            }
        }
    });

    notifier.success(
        NotificationOptions::default()
            .title("Saved")
            .message("Your changes were saved")
            .duration(Duration::from_millis(1500)),
    );
    notifier.warning(NotificationOptions::default().title("Disk almost full"));

    let request: PushRequest = serde_json::from_value(serde_json::json!({
        "id": "update-available",
        "type": "info",
        "title": "Update available",
        "duration": "infinite",
        "render": { "component": "UpdateCard", "props": { "version": "0.4.1" } }
    }))
    .context("Invalid demo push")?;
    notifier.push(request);

    let upload = notifier.promise(NotificationOptions::default().title("Uploading report.pdf"));
    tokio::time::sleep(Duration::from_millis(500)).await;
    upload.update(NotificationOptions::default().message("50%"));

    notifier.interaction_start(InteractionSource::Hover);
    tokio::time::sleep(Duration::from_millis(2000)).await;
    notifier.interaction_end(InteractionSource::Hover);

    upload.resolve(
        NotificationOptions::default()
            .title("Uploaded report.pdf")
            .duration(Duration::from_millis(1000)),
    );

    tokio::time::sleep(Duration::from_millis(1200)).await;
    for view in notifier.snapshot().items.iter() {
        tracing::info!("Still visible: {} {} {:?}", view.id, view.kind, view.options.title);
    }

    notifier.clear_all();
    tokio::time::sleep(Duration::from_millis(10)).await;

    receivers.shutdown();
    drop(notifier);
    log_events.abort();
    Ok(())
}
