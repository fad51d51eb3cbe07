//! LLM clients used by the re-ranker.

mod chat_client;

pub use chat_client::ChatCompletionsClient;
