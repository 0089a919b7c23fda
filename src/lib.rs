pub mod config;
pub mod error;
pub mod extract;
pub mod importer;
pub mod llm;
pub mod server;
pub mod utils;
pub mod vocabulary;
