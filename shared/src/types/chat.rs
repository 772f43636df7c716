use serde::{Deserialize, Serialize};

/// Greeting that opens every flora identifier conversation
pub const CHAT_WELCOME: &str = "Welcome to the Flora Identifier! Enter a flower name, and I'll provide ways to differentiate it from similar species.";

/// Reply appended to the transcript when the assistant call fails
pub const CHAT_APOLOGY: &str = "I'm sorry, I couldn't process that request. Please try again with a different flower name.";

/// System prompt sent with every question
pub const FLORA_SYSTEM_MESSAGE: &str = "You are a botanical expert specializing in flower identification. Provide clear, accurate, and concise information about how to identify and differentiate flowers from similar species.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            is_error: false,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            is_error: false,
        }
    }

    pub fn apology() -> Self {
        Self {
            role: ChatRole::Assistant,
            content: CHAT_APOLOGY.to_string(),
            is_error: true,
        }
    }
}

/// Body of `ask_chatgpt`
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub prompt: &'a str,
    pub system_message: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
