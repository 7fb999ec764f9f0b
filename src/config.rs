use crate::error::SetupError;
use figment::{Figment, providers::Env};
use serde::Deserialize;
use url::Url;

/// Runtime configuration, resolved from the environment after `.env` loading.
///
/// `SUPABASE_URL` and `SUPABASE_SERVICE_KEY` are required; `SUPABASE_ANON_KEY`
/// is documented alongside them for the downstream app but never read here.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub supabase_url: Url,
    pub supabase_service_key: String,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

fn default_loglevel() -> String {
    "info".to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, SetupError> {
        let figment = Figment::new().merge(Env::raw().only(&[
            "SUPABASE_URL",
            "SUPABASE_SERVICE_KEY",
            "LOGLEVEL",
        ]));
        let cfg: Self = figment.extract()?;
        if cfg.supabase_service_key.trim().is_empty() {
            return Err(SetupError::MissingCredential("SUPABASE_SERVICE_KEY"));
        }
        Ok(cfg)
    }
}
