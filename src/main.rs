use anyhow::Context;
use toast_queue::{ConfigUpdate, ToastKind, ToastsConfig, logging, spawn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    color_backtrace::install();
    logging::init()?;

    let config = match std::env::args_os().nth(1) {
        Some(path) => ToastsConfig::load(&path)
            .with_context(|| format!("loading config {}", path.to_string_lossy()))?,
        None => ToastsConfig::default(),
    };
    tracing::info!(
        max_visible = config.max_visible,
        deduplication = config.deduplication_enabled,
        reduced_motion = config.effective_reduced_motion(false),
        "starting toast demo"
    );

    let (handle, task) = spawn(config);
    let mut snapshots = handle.subscribe();

    handle
        .add_toast("Operation completed successfully!", ToastKind::Success)
        .await?;
    handle.add_toast("Something went wrong!", ToastKind::Error).await?;
    handle
        .add_toast("Here's some information for you", ToastKind::Info)
        .await?;
    // Rapid duplicates only refresh the first one
    for _ in 0..3 {
        handle.add_toast("Something went wrong!", ToastKind::Error).await?;
    }
    for i in 1..=5 {
        handle.add_toast(format!("Toast {i}"), ToastKind::Info).await?;
    }
    handle.configure(ConfigUpdate::max_visible(4)).await?;

    while snapshots.changed().await.is_ok() {
        let visible = snapshots.borrow_and_update().clone();
        let line = visible
            .iter()
            .map(|t| format!("[{}] {}", t.kind, t.message))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(count = visible.len(), "visible: {line}");
        if visible.is_empty() {
            break;
        }
    }

    handle.shutdown().await?;
    task.await.context("toast service panicked")?;
    Ok(())
}
