use agora_client::AgoraClient;
use agora_shared::types::{ChatMessage, ChatRole, CHAT_WELCOME};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::context::AppContext;
use crate::error::CliResult;

/// Flora identifier transcript, opened by the welcome message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(CHAT_WELCOME)],
        }
    }
}

impl Conversation {
    /// Sends one question; blank input is ignored and yields `None`
    pub async fn ask(&mut self, client: &AgoraClient, input: &str) -> Option<&ChatMessage> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::user(input));

        let reply = match client.ask_chatgpt(input).await {
            Ok(answer) => ChatMessage::assistant(answer),
            Err(e) => {
                warn!("Flora assistant failed: {}", e);
                ChatMessage::apology()
            }
        };
        self.messages.push(reply);
        self.messages.last()
    }

    pub fn render(&self) -> String {
        self.messages
            .iter()
            .map(render_message)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

pub fn render_message(message: &ChatMessage) -> String {
    match message.role {
        ChatRole::User => format!("You: {}", message.content),
        ChatRole::Assistant => format!("Flora: {}", message.content),
    }
}

pub async fn chat(ctx: &AppContext, prompt: Option<String>) -> CliResult<String> {
    let mut conversation = Conversation::default();

    if let Some(prompt) = prompt {
        conversation.ask(&ctx.client, &prompt).await;
        return Ok(conversation.render());
    }

    println!("{}", conversation.render());
    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(reply) = conversation.ask(&ctx.client, &line).await {
            println!("\n{}\n", render_message(reply));
        }
    }
    Ok(String::new())
}
