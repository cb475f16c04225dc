mod client;
pub mod prompts;
pub mod response;

pub use client::LlmClient;
