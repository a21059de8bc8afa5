use super::events::{InboundEvent, MessageContent, ReplyToken};

/// A text message that can be translated and answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionableMessage {
    pub text: String,
    pub reply_token: ReplyToken,
}

/// Returns the text and reply token of a text message event, `None` for
/// everything else.
pub fn is_actionable(event: &InboundEvent) -> Option<ActionableMessage> {
    let InboundEvent::Message(message) = event else {
        return None;
    };
    let MessageContent::Text(text) = &message.message else {
        return None;
    };
    let reply_token = message.reply_token.clone()?;

    Some(ActionableMessage {
        text: text.text.clone(),
        reply_token,
    })
}
