//! Application configuration.
//!
//! All runtime settings come from environment variables, read once at boot
//! into an [AppConfig] that is passed down to every component. No module
//! reads the environment directly.

use envconfig::Envconfig;

use crate::consts;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database connection string
    /// Example: "sqlite:calico.db"
    #[envconfig(default = "sqlite:calico.db")]
    pub db_host: String,

    /// Host address for web server binding
    #[envconfig(default = "0.0.0.0")]
    pub wep_server_host: String,

    /// Port for web server binding
    #[envconfig(default = "3000")]
    pub wep_server_port: u64,

    /// Directory where uploaded certificate images are stored
    #[envconfig(default = "uploads")]
    pub uploads_dir: String,

    /// 🔒 SENSITIVE: Google Gemini API key used by the extraction client.
    /// An empty value is accepted at boot; extraction requests will fail
    /// with a service error until one is configured.
    #[envconfig(default = "")]
    pub gemini_api_key: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Constructs the Gemini `generateContent` endpoint for the configured model
    pub fn gemini_generate_content_endpoint(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent",
            model = consts::GEMINI_MODEL
        )
    }
}
