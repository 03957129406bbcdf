mod openai_client;

pub use openai_client::{DEFAULT_SYSTEM_PROMPT, OpenAiClient};
