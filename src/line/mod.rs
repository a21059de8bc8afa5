pub mod events;
pub mod filter;
pub mod messaging;

pub use events::{InboundEvent, ReplyToken, WebhookBody};
pub use filter::{is_actionable, ActionableMessage};
pub use messaging::{LineMessagingClient, MessagingClient, MessagingError, ReplyMessageRequest};
