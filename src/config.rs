use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Args;

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_PORT: u16 = 3000;

/// Where the generation requests go.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ProviderArgs {
    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "VOCAB_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long, env = "VOCAB_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,
    /// Port to listen on
    #[arg(long, env = "VOCAB_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Model used to generate vocabulary
    #[arg(long, env = "VOCAB_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,
    #[command(flatten)]
    pub provider: ProviderArgs,
}

impl ServeArgs {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
