use crate::constants::CHANNEL_BUFFER_SIZE;
use crate::scheduler::{TimerHandle, TokioScheduler};
use crate::state::ToastQueue;
use anyhow::anyhow;
use toast_queue_config::{ConfigUpdate, ToastsConfig};
use toast_queue_util::{ToastId, ToastKind, ToastRecord};
use tokio::{
    sync::{
        mpsc::{Receiver, Sender, UnboundedReceiver, channel},
        watch,
    },
    task::JoinHandle,
};

#[derive(Debug, Clone)]
pub enum Input {
    Add { message: String, kind: ToastKind },
    Remove(ToastId),
    Configure(ConfigUpdate),
    Shutdown,
}

/// Cloneable front end of a running toast service
#[derive(Debug, Clone)]
pub struct ToastHandle {
    tx: Sender<Input>,
    visible: watch::Receiver<Vec<ToastRecord>>,
}

impl ToastHandle {
    pub async fn add_toast(&self, message: impl Into<String>, kind: ToastKind) -> anyhow::Result<()> {
        self.send(Input::Add {
            message: message.into(),
            kind,
        })
        .await
    }

    pub async fn remove_toast(&self, id: ToastId) -> anyhow::Result<()> {
        self.send(Input::Remove(id)).await
    }

    pub async fn configure(&self, update: ConfigUpdate) -> anyhow::Result<()> {
        self.send(Input::Configure(update)).await
    }

    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.send(Input::Shutdown).await
    }

    /// Receiver of visible snapshots, updated whenever the visible set changes
    pub fn subscribe(&self) -> watch::Receiver<Vec<ToastRecord>> {
        self.visible.clone()
    }

    /// Latest published snapshot
    pub fn visible(&self) -> Vec<ToastRecord> {
        self.visible.borrow().clone()
    }

    async fn send(&self, input: Input) -> anyhow::Result<()> {
        self.tx
            .send(input)
            .await
            .map_err(|_| anyhow!("toast service is not running"))
    }
}

/// Spawn the toast service on the current tokio runtime
pub fn spawn(config: ToastsConfig) -> (ToastHandle, JoinHandle<()>) {
    let (tx, rx) = channel(CHANNEL_BUFFER_SIZE);
    let (scheduler, fired) = TokioScheduler::new();
    let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());
    let queue = ToastQueue::new(&config, scheduler);

    let task = tokio::spawn(run(queue, rx, fired, snapshot_tx));
    (
        ToastHandle {
            tx,
            visible: snapshot_rx,
        },
        task,
    )
}

async fn run(
    mut queue: ToastQueue<TokioScheduler>,
    mut rx: Receiver<Input>,
    mut fired: UnboundedReceiver<TimerHandle>,
    snapshots: watch::Sender<Vec<ToastRecord>>,
) {
    let mut published = queue.revision();

    loop {
        tokio::select! {
            input = rx.recv() => match input {
                Some(Input::Add { message, kind }) => {
                    queue.add_toast(message, kind);
                }
                Some(Input::Remove(id)) => {
                    if queue.remove_toast(id).is_none() {
                        tracing::trace!("Remove for unknown {id}");
                    }
                }
                Some(Input::Configure(update)) => queue.configure(update),
                Some(Input::Shutdown) | None => break,
            },
            Some(handle) = fired.recv() => {
                queue.fire(handle);
            }
        }

        if queue.revision() != published {
            published = queue.revision();
            // Nobody listening is fine; handles may only push
            snapshots.send_replace(queue.visible().to_vec());
        }
    }

    queue.shutdown();
    tracing::info!("Toast service stopped");
}
