pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod service;

pub use api::supabase::SupabaseClient;
pub use config::Config;
pub use error::SetupError;
pub use service::provisioner::{Provisioner, SetupBackend};
pub use service::report::SetupReport;
