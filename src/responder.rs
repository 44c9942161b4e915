// Simulated peer: every send schedules one canned reply after a fixed delay.

use chrono::Local;
use log::debug;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::mock;
use crate::models::Message;

#[derive(Debug, Clone)]
pub struct AutoResponder {
    delay: Duration,
    reply_tx: UnboundedSender<Message>,
}

impl AutoResponder {
    /// Creates a responder and the receiver its replies arrive on.
    pub fn new(delay: Duration) -> (Self, UnboundedReceiver<Message>) {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        (AutoResponder { delay, reply_tx }, reply_rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Fire and forget. The reply is not tied to the message that caused it
    /// and cannot be cancelled; whoever drains the receiver gets it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self) {
        let delay = self.delay;
        let reply_tx = self.reply_tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = mock::auto_reply(Local::now());
            let reply_id = reply.id.clone();
            match reply_tx.send(reply) {
                Ok(_) => debug!("Auto-reply {} queued after {:?}", reply_id, delay),
                Err(e) => debug!("Dropping auto-reply {}: {}", reply_id, e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryStatus, Sender};

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_delay() {
        let (responder, mut reply_rx) = AutoResponder::new(mock::AUTO_REPLY_DELAY);
        let start = tokio::time::Instant::now();

        responder.schedule();
        let reply = reply_rx.recv().await.expect("reply should arrive");

        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(reply.text, mock::AUTO_REPLY_TEXT);
        assert_eq!(reply.sender, Sender::Peer);
        assert_eq!(reply.delivery_status, DeliveryStatus::Sent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_before_delay() {
        let (responder, mut reply_rx) = AutoResponder::new(Duration::from_millis(1500));
        responder.schedule();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(reply_rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(reply_rx.try_recv().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_reply_per_schedule() {
        let (responder, mut reply_rx) = AutoResponder::new(Duration::from_millis(1500));
        responder.schedule();
        responder.schedule();

        let first = reply_rx.recv().await.unwrap();
        let second = reply_rx.recv().await.unwrap();
        assert_ne!(first.id, second.id);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(reply_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_receiver_is_harmless() {
        let (responder, reply_rx) = AutoResponder::new(Duration::from_millis(10));
        drop(reply_rx);
        responder.schedule();
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
