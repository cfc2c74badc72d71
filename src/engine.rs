use anyhow::Result;
use async_trait::async_trait;

use crate::prompt::ChatMessage;

/// The seam between the request pipeline and the remote model provider.
///
/// Implementors send the conversation to a chat-completion backend and
/// return the top choice's text content. Any remote failure surfaces as an
/// error; callers decide how to map it.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;
}
