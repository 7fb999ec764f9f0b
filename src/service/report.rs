use crate::db::models::Role;
use crate::db::schema::TableSpec;
use std::fmt;

/// Outcome of one table provisioning step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    Created,
    AlreadyExists,
    /// The creation RPC was unavailable or failed; the operator has to
    /// apply the DDL by hand.
    ManualSqlRequired,
    Failed(String),
}

/// Outcome of one seed-user step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserOutcome {
    Created,
    AlreadyExists,
    Failed(String),
}

#[derive(Debug)]
pub struct TableReport {
    pub table: &'static TableSpec,
    pub outcome: TableOutcome,
}

#[derive(Debug)]
pub struct UserReport {
    pub username: &'static str,
    pub role: Role,
    pub outcome: UserOutcome,
}

/// Everything a setup run did, one entry per table and per seed user.
///
/// Rendering via `Display` produces the operator-facing status lines,
/// including the raw DDL for tables that need manual application and the
/// final created/already-exists tally.
#[derive(Debug, Default)]
pub struct SetupReport {
    pub tables: Vec<TableReport>,
    pub users: Vec<UserReport>,
}

impl SetupReport {
    pub fn users_created(&self) -> usize {
        self.users
            .iter()
            .filter(|u| u.outcome == UserOutcome::Created)
            .count()
    }

    pub fn users_existing(&self) -> usize {
        self.users
            .iter()
            .filter(|u| u.outcome == UserOutcome::AlreadyExists)
            .count()
    }
}

impl fmt::Display for SetupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Tables:")?;
        for entry in &self.tables {
            let name = entry.table.name;
            match &entry.outcome {
                TableOutcome::Created => writeln!(f, "   ✅ {name} table created")?,
                TableOutcome::AlreadyExists => writeln!(f, "   ✅ {name} table exists")?,
                TableOutcome::ManualSqlRequired => {
                    writeln!(f, "   ⚠️ Could not create {name} via the exec_sql RPC")?;
                    writeln!(f, "   📝 Run this SQL manually in the Supabase SQL editor:")?;
                    writeln!(f, "{}", entry.table.ddl)?;
                }
                TableOutcome::Failed(reason) => {
                    writeln!(f, "   ⚠️ Error with {name}: {reason}")?;
                }
            }
        }
        writeln!(f, "\n👥 Users:")?;
        for entry in &self.users {
            match &entry.outcome {
                UserOutcome::Created => {
                    writeln!(f, "   ✅ Created {} ({})", entry.username, entry.role)?;
                }
                UserOutcome::AlreadyExists => {
                    writeln!(f, "   ✓ {} already exists", entry.username)?;
                }
                UserOutcome::Failed(reason) => {
                    writeln!(f, "   ❌ Failed to create {}: {reason}", entry.username)?;
                }
            }
        }
        writeln!(
            f,
            "\n   📊 Created: {}, Already exists: {}",
            self.users_created(),
            self.users_existing()
        )
    }
}
