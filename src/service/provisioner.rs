use super::report::{SetupReport, TableOutcome, TableReport, UserOutcome, UserReport};
use crate::db::models::{NewUser, UserRow};
use crate::db::schema::{TABLES, TableSpec};
use crate::db::seed::{DEFAULT_USERS, SeedUser};
use crate::error::SetupError;
use tracing::{info, warn};

/// Result of the lightweight table-existence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The table answered the probe (possibly with zero rows).
    Responds,
    /// The backend reported that the relation does not exist.
    MissingRelation,
}

/// The backend capabilities the setup run consumes. `SupabaseClient`
/// implements this against PostgREST; tests substitute an in-memory fake.
pub trait SetupBackend {
    async fn probe(&self, table: &str) -> Result<ProbeOutcome, SetupError>;
    async fn execute_sql(&self, statement: &str) -> Result<(), SetupError>;
    async fn find_user(&self, username: &str) -> Result<Option<UserRow>, SetupError>;
    async fn insert_user(&self, user: &NewUser) -> Result<(), SetupError>;
}

/// One-shot idempotent setup: ensures the fixed table set exists, then
/// seeds the default accounts. Every failure is absorbed at per-table or
/// per-user scope, so `run` always yields a full report.
pub struct Provisioner<B> {
    backend: B,
}

impl<B: SetupBackend> Provisioner<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn run(&self) -> SetupReport {
        let mut report = SetupReport::default();
        for spec in &TABLES {
            let outcome = self.ensure_table(spec).await;
            report.tables.push(TableReport {
                table: spec,
                outcome,
            });
        }
        for seed in &DEFAULT_USERS {
            let outcome = self.ensure_user(seed).await;
            report.users.push(UserReport {
                username: seed.username,
                role: seed.role,
                outcome,
            });
        }
        report
    }

    /// Probe the table and create it only when the backend reports the
    /// relation as missing. A failing creation RPC degrades to
    /// `ManualSqlRequired` instead of aborting the run.
    pub async fn ensure_table(&self, spec: &TableSpec) -> TableOutcome {
        match self.backend.probe(spec.name).await {
            Ok(ProbeOutcome::Responds) => {
                info!(table = spec.name, "table exists");
                TableOutcome::AlreadyExists
            }
            Ok(ProbeOutcome::MissingRelation) => {
                info!(table = spec.name, "creating table");
                match self.backend.execute_sql(spec.ddl).await {
                    Ok(()) => {
                        info!(table = spec.name, "table created");
                        TableOutcome::Created
                    }
                    Err(e) => {
                        warn!(
                            table = spec.name,
                            error = %e,
                            "could not create table via RPC; manual SQL required"
                        );
                        TableOutcome::ManualSqlRequired
                    }
                }
            }
            Err(e) => {
                warn!(table = spec.name, error = %e, "table probe failed");
                TableOutcome::Failed(e.to_string())
            }
        }
    }

    /// Look the seed up by username and insert it only on a miss. An
    /// existing row is never updated, even when its fields differ from
    /// the seed.
    pub async fn ensure_user(&self, seed: &SeedUser) -> UserOutcome {
        match self.backend.find_user(seed.username).await {
            Ok(Some(_)) => {
                info!(username = seed.username, "user already exists");
                UserOutcome::AlreadyExists
            }
            Ok(None) => match self.backend.insert_user(&seed.to_new_user()).await {
                Ok(()) => {
                    info!(username = seed.username, role = %seed.role, "user created");
                    UserOutcome::Created
                }
                Err(e) => {
                    warn!(username = seed.username, error = %e, "user insert failed");
                    UserOutcome::Failed(e.to_string())
                }
            },
            Err(e) => {
                warn!(username = seed.username, error = %e, "user lookup failed");
                UserOutcome::Failed(e.to_string())
            }
        }
    }
}
