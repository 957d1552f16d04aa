use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

/// A user's persisted assistant transcript.
///
/// Replaced wholesale on every save; messages are never merged.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatHistory {
    pub messages: Vec<ChatHistoryMessage>,
    pub updated_at: jiff::Timestamp,
}

/// A single message in a persisted transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatHistoryMessage {
    #[ts(type = "string")]
    pub sender: ChatSender,
    pub text: String,
}

/// Who sent a transcript message.
///
/// Senders other than `"user"` and `"bot"` are kept verbatim so a saved
/// transcript loads back unchanged; they replay as assistant turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatSender {
    User,
    Bot,
    Other(String),
}

impl ChatSender {
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
            Self::Other(sender) => sender,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }
}

impl From<String> for ChatSender {
    fn from(sender: String) -> Self {
        match sender.as_str() {
            "user" => Self::User,
            "bot" => Self::Bot,
            _ => Self::Other(sender),
        }
    }
}

impl Serialize for ChatSender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChatSender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
