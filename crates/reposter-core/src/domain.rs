use std::{fmt, str::FromStr};

use crate::errors::Error;

/// Telegram chat id (numeric). Users, groups and channels share one id
/// space; group and channel ids are negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ChatId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(ChatId)
            .map_err(|_| Error::InvalidChatId(s.to_string()))
    }
}

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_id_roundtrips_through_strings() {
        let id: ChatId = "-1001234".parse().unwrap();
        assert_eq!(id, ChatId(-1001234));
        assert_eq!(id.to_string(), "-1001234");
    }

    #[test]
    fn chat_id_rejects_non_numeric_input() {
        let err = "somechannel".parse::<ChatId>().unwrap_err();
        assert!(matches!(err, Error::InvalidChatId(raw) if raw == "somechannel"));
    }
}
