use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Server host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port to bind to
    #[arg(long, env = "PORT", default_value = "10000")]
    pub port: u16,

    /// API key for the chat-completion provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the chat-completion API
    #[arg(long, env = "OPENAI_API_BASE", default_value = "https://api.openai.com/v1")]
    pub api_base: String,

    /// Model identifier sent with every completion request
    #[arg(long, env = "MODEL", default_value = "gpt-3.5-turbo")]
    pub model: String,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "PERMISSIVE_CORS")]
    pub permissive_cors: bool,

    /// Escape non-ASCII characters in JSON responses
    #[arg(long, env = "ASCII_JSON")]
    pub ascii_json: bool,
}

impl Config {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
