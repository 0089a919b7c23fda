pub mod client;
pub mod prompt;
pub mod response;
pub mod secrets;

pub use client::{initialize_client, require_api_key, test_configured_api_key};
pub use prompt::{SYSTEM_PROMPT, build_vocabulary_prompt};
pub use response::{OpenAiGenerator, TextGenerator};
pub use secrets::{clear_api_key, store_api_key};
