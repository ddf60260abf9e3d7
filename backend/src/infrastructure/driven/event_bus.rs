use std::sync::Arc;
use anyhow::anyhow;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use crate::application::discussion::{NotificationOutcome, ResponseNotificationHandler};
use crate::domain::events::{CommentCreated, DomainEvent};

pub type CommentEvent = DomainEvent<CommentCreated>;

/// Publishing half of the in-process event bus
#[derive(Clone)]
pub struct EventPublisher {
    tx: mpsc::Sender<CommentEvent>,
}

impl EventPublisher {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<CommentEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub async fn publish(&self, event: CommentEvent) -> anyhow::Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| anyhow!("Notification worker is not running"))
    }
}

/// Consume comment events until every publisher is dropped.
///
/// Task failures are logged and never reach the publisher.
pub fn spawn_notification_worker(
    mut rx: mpsc::Receiver<CommentEvent>,
    handler: Arc<ResponseNotificationHandler>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let thread_id = event.data.thread.id.clone();
            tracing::debug!(event = %event.event_id, occurred_at = %event.occurred_at, thread = %thread_id, "Handling comment event");
            match handler.handle(&event.data).await {
                Ok(NotificationOutcome::Sent) => {
                    tracing::debug!(event = %event.event_id, thread = %thread_id, "Response notification sent");
                }
                Ok(outcome) => {
                    tracing::debug!(event = %event.event_id, thread = %thread_id, ?outcome, "Response notification skipped");
                }
                Err(e) => {
                    tracing::error!(event = %event.event_id, thread = %thread_id, error = %e, "Response notification failed");
                }
            }
        }
        tracing::info!("Notification worker stopped");
    })
}
