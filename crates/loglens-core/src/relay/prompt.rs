//! Prompt construction for log analysis turns.

use loglens_types::llm::{ChatRequest, Message};

/// Fixed instruction sent as the system message of every turn.
pub const SYSTEM_PROMPT: &str = "\
You are a log analysis assistant.
You will be given raw server logs and a user question.
Your job is to:
1. Identify and extract errors and warnings.
2. Suggest potential fixes.
3. Respond in clear text (Markdown allowed).";

/// Render the user message: the log text followed by the question.
pub fn user_content(log_text: &str, user_message: &str) -> String {
    format!("Logs:\n{log_text}\n\nUser request: {user_message}")
}

/// Build the streaming request for one turn: system instruction, then
/// logs plus question as a single user message.
pub fn build_chat_request(model: &str, log_text: &str, user_message: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(user_content(log_text, user_message)),
        ],
        stream: true,
    }
}
