use std::sync::Arc;
use futures::future::join_all;
use tracing::{debug, error, info};

use crate::config::TargetLanguage;
use crate::line::{is_actionable, InboundEvent, MessagingClient, MessagingError, ReplyMessageRequest};
use crate::translate::{TranslationOutcome, TranslationRequest, TranslationRouter};

/// Counters for one delivery, used for logging only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub received: usize,
    pub actionable: usize,
    pub replied: usize,
    pub failed: usize,
}

enum EventResult {
    Ignored,
    Replied,
    ReplyFailed,
}

/// Runs filter, translation and reply for every event of a delivery.
pub struct Dispatcher {
    router: Arc<TranslationRouter>,
    messenger: Arc<dyn MessagingClient>,
    target_language: TargetLanguage,
}

impl Dispatcher {
    pub fn new(
        router: Arc<TranslationRouter>,
        messenger: Arc<dyn MessagingClient>,
        target_language: TargetLanguage,
    ) -> Self {
        Self {
            router,
            messenger,
            target_language,
        }
    }

    /// Handle every event concurrently. Never fails: per-event errors are
    /// logged and counted.
    pub async fn handle_batch(&self, events: Vec<InboundEvent>) -> BatchSummary {
        let received = events.len();
        let results = join_all(events.iter().map(|event| self.handle_event(event))).await;

        let mut summary = BatchSummary {
            received,
            ..Default::default()
        };
        for result in results {
            match result {
                EventResult::Ignored => {}
                EventResult::Replied => {
                    summary.actionable += 1;
                    summary.replied += 1;
                }
                EventResult::ReplyFailed => {
                    summary.actionable += 1;
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    async fn handle_event(&self, event: &InboundEvent) -> EventResult {
        let Some(message) = is_actionable(event) else {
            debug!("Ignoring {} event", event.kind());
            return EventResult::Ignored;
        };

        if let InboundEvent::Message(m) = event {
            if let Some(timestamp) = m.timestamp {
                debug!("Message sent at {}", timestamp.to_rfc3339());
            }
        }
        info!("Received text: \"{}\". Translating...", message.text);

        let request = TranslationRequest::new(message.text, &self.target_language);
        let outcome = self.router.translate(&request).await;
        let reply = ReplyMessageRequest::text(message.reply_token, outcome.reply_text());

        match self.send_reply(&reply, &outcome).await {
            Ok(()) => EventResult::Replied,
            Err(e) => {
                error!("Failed to send reply message: {}", e);
                EventResult::ReplyFailed
            }
        }
    }

    async fn send_reply(
        &self,
        reply: &ReplyMessageRequest,
        outcome: &TranslationOutcome,
    ) -> Result<(), MessagingError> {
        self.messenger.reply_message(reply).await?;
        if outcome.is_success() {
            info!("Successfully sent translation: \"{}\"", outcome.reply_text());
        } else {
            info!("Sent {} reply", outcome.kind());
        }
        Ok(())
    }
}
