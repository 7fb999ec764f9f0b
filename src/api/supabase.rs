use crate::config::Config;
use crate::db::models::{NewUser, UserRow};
use crate::error::{PostgrestError, SetupError};
use crate::service::provisioner::{ProbeOutcome, SetupBackend};
use reqwest::Response;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

/// Thin client over the Supabase PostgREST surface.
///
/// Holds a single `reqwest::Client` with the service-role credentials as
/// default headers; every call is a plain request/response with no retries.
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_base: Url,
}

impl SupabaseClient {
    pub fn new(cfg: &Config) -> Result<Self, SetupError> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&cfg.supabase_service_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", cfg.supabase_service_key))?,
        );
        let http = reqwest::Client::builder()
            .user_agent(concat!("fundbook-setup/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;
        let rest_base = cfg.supabase_url.join("rest/v1/")?;
        Ok(Self { http, rest_base })
    }

    /// Decode a non-2xx response into the PostgREST error body; bodies
    /// that are not the expected JSON shape surface as the bare status.
    async fn error_from(resp: Response) -> SetupError {
        let status = resp.status();
        match resp.bytes().await {
            Ok(body) => match serde_json::from_slice::<PostgrestError>(&body) {
                Ok(err) => SetupError::Postgrest(err),
                Err(_) => SetupError::UnexpectedStatus(status),
            },
            Err(e) => SetupError::Reqwest(e),
        }
    }
}

impl SetupBackend for SupabaseClient {
    async fn probe(&self, table: &str) -> Result<ProbeOutcome, SetupError> {
        let url = self.rest_base.join(table)?;
        let resp = self
            .http
            .get(url)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(ProbeOutcome::Responds);
        }
        match Self::error_from(resp).await {
            SetupError::Postgrest(err) if err.is_undefined_table() => {
                Ok(ProbeOutcome::MissingRelation)
            }
            err => Err(err),
        }
    }

    async fn execute_sql(&self, statement: &str) -> Result<(), SetupError> {
        let url = self.rest_base.join("rpc/exec_sql")?;
        let resp = self
            .http
            .post(url)
            .json(&serde_json::json!({ "query": statement }))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(resp).await)
        }
    }

    async fn find_user(&self, username: &str) -> Result<Option<UserRow>, SetupError> {
        let url = self.rest_base.join("users")?;
        let filter = format!("eq.{username}");
        let resp = self
            .http
            .get(url)
            .query(&[("select", "*"), ("username", filter.as_str())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        // Username is unique, so at most one row comes back.
        let mut rows: Vec<UserRow> = resp.json().await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    async fn insert_user(&self, user: &NewUser) -> Result<(), SetupError> {
        let url = self.rest_base.join("users")?;
        let resp = self
            .http
            .post(url)
            .header("Prefer", "return=minimal")
            .json(&[user])
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(resp).await)
        }
    }
}
