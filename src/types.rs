//! Wire types for Discord interactions received over the webhook.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::{BotError, Result};

/// Kind of an inbound interaction.
///
/// Discord sends this as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum InteractionType {
    /// Liveness check sent when the endpoint is registered
    Ping,
    /// A user invoked a slash command
    ApplicationCommand,
    /// Anything else; acknowledged with an empty body
    Other(i64),
}

impl Default for InteractionType {
    fn default() -> Self {
        InteractionType::Other(0)
    }
}

impl From<i64> for InteractionType {
    fn from(value: i64) -> Self {
        match value {
            1 => InteractionType::Ping,
            2 => InteractionType::ApplicationCommand,
            other => InteractionType::Other(other),
        }
    }
}

/// Kind of an outbound interaction response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(into = "u8")]
pub enum InteractionResponseType {
    Pong,
    Acknowledge,
    ChannelMessage,
    ChannelMessageWithSource,
    AckWithSource,
}

impl From<InteractionResponseType> for u8 {
    fn from(kind: InteractionResponseType) -> Self {
        match kind {
            InteractionResponseType::Pong => 1,
            InteractionResponseType::Acknowledge => 2,
            InteractionResponseType::ChannelMessage => 3,
            InteractionResponseType::ChannelMessageWithSource => 4,
            InteractionResponseType::AckWithSource => 5,
        }
    }
}

/// Inbound interaction payload.
///
/// Both the lowercase Discord field names and their capitalised forms are
/// accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type", alias = "Type", default)]
    pub kind: InteractionType,
    #[serde(default, alias = "Data")]
    pub data: Option<InteractionData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionData {
    #[serde(default, alias = "Options")]
    pub options: Option<Vec<CommandOption>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    #[serde(default, alias = "Value")]
    pub value: Option<String>,
}

impl Interaction {
    /// The symbol requested by a command, taken from its first option.
    pub fn symbol(&self) -> Result<&str> {
        let option = self
            .data
            .as_ref()
            .and_then(|data| data.options.as_deref())
            .and_then(<[CommandOption]>::first)
            .ok_or_else(|| BotError::MalformedCommand("command has no options".to_string()))?;

        option
            .value
            .as_deref()
            .ok_or_else(|| BotError::MalformedCommand("first option has no value".to_string()))
    }
}

/// Outbound interaction response.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageData {
    pub content: String,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: InteractionResponseType::Pong,
            data: None,
        }
    }

    pub fn message(content: String) -> Self {
        Self {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(MessageData { content }),
        }
    }
}
