//! chatbot-manager resources.

pub mod chatbot;
pub mod chatbotcall;
