use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of one webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBody {
    // Verification deliveries from the console carry no events at all.
    #[serde(default)]
    pub events: Vec<InboundEvent>,
}

/// Events the platform can deliver. Only `message` is acted upon; every
/// other kind, known or not, deserializes and is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundEvent {
    Message(MessageEvent),
    Follow,
    Unfollow,
    Join,
    Leave,
    Postback,
    Unsend,
    #[serde(other)]
    Other,
}

impl InboundEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Postback => "postback",
            Self::Unsend => "unsend",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// Absent for events delivered in standby mode.
    pub reply_token: Option<ReplyToken>,
    pub message: MessageContent,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent {
    Text(TextMessage),
    Image,
    Video,
    Audio,
    File,
    Location,
    Sticker,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextMessage {
    pub text: String,
}

/// Single-use token that ties a reply to the event it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplyToken(String);

impl ReplyToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_text_message_event() {
        let body: WebhookBody = serde_json::from_value(json!({
            "destination": "U000",
            "events": [{
                "type": "message",
                "mode": "active",
                "timestamp": 1700000000000i64,
                "webhookEventId": "01HEXAMPLE",
                "replyToken": "reply-1",
                "source": { "type": "user", "userId": "U123" },
                "message": { "type": "text", "id": "m1", "text": "Hola", "quoteToken": "q" }
            }]
        }))
        .unwrap();

        let InboundEvent::Message(event) = &body.events[0] else {
            panic!("expected a message event");
        };
        assert_eq!(event.reply_token.as_ref().unwrap().as_str(), "reply-1");
        assert_eq!(event.timestamp.unwrap().timestamp_millis(), 1_700_000_000_000);
        match &event.message {
            MessageContent::Text(text) => assert_eq!(text.text, "Hola"),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn unknown_and_non_text_kinds_still_parse() {
        let body: WebhookBody = serde_json::from_value(json!({
            "events": [
                { "type": "follow", "replyToken": "r", "timestamp": 1 },
                { "type": "beacon", "beacon": { "hwid": "x" } },
                { "type": "message", "replyToken": "r2", "message": { "type": "sticker", "packageId": "1" } },
                { "type": "message", "replyToken": "r3", "message": { "type": "somethingNew" } }
            ]
        }))
        .unwrap();

        let kinds: Vec<_> = body.events.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, ["follow", "other", "message", "message"]);
        assert!(matches!(
            &body.events[3],
            InboundEvent::Message(MessageEvent { message: MessageContent::Other, .. })
        ));
    }

    #[test]
    fn unexpected_source_shapes_do_not_reject_the_event() {
        let body: WebhookBody = serde_json::from_value(json!({
            "events": [
                { "type": "message", "replyToken": "a", "source": { "userId": "U1" },
                  "message": { "type": "text", "text": "one" } },
                { "type": "message", "replyToken": "b", "source": "group",
                  "message": { "type": "text", "text": "two" } },
                { "type": "message", "replyToken": "c",
                  "message": { "type": "text", "text": "three" } }
            ]
        }))
        .unwrap();

        let texts: Vec<_> = body
            .events
            .iter()
            .map(|event| match event {
                InboundEvent::Message(MessageEvent {
                    message: MessageContent::Text(text),
                    ..
                }) => text.text.as_str(),
                other => panic!("unexpected event: {:?}", other),
            })
            .collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn missing_events_is_an_empty_batch() {
        let body: WebhookBody = serde_json::from_str(r#"{"destination":"U000"}"#).unwrap();
        assert!(body.events.is_empty());
    }
}
