use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use fundbook_setup::Provisioner;
use fundbook_setup::db::models::{NewUser, UserRow};
use fundbook_setup::db::schema::TABLES;
use fundbook_setup::db::seed::DEFAULT_USERS;
use fundbook_setup::error::{PostgrestError, SetupError};
use fundbook_setup::service::provisioner::{ProbeOutcome, SetupBackend};
use fundbook_setup::service::report::{TableOutcome, UserOutcome};

#[derive(Default)]
struct State {
    tables: HashSet<String>,
    users: HashMap<String, UserRow>,
    rpc_unavailable: bool,
    failing_probes: HashMap<String, String>,
    failing_inserts: HashSet<String>,
    executed_sql: Vec<String>,
    next_id: i64,
}

/// In-memory stand-in for the PostgREST surface: tables and users live in
/// a shared map, and failures are scripted per table or per username.
#[derive(Clone, Default)]
struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    fn fresh() -> Self {
        Self::default()
    }

    /// A backend where all four tables and all five seed users already exist.
    fn provisioned() -> Self {
        let fake = Self::fresh();
        {
            let mut state = fake.state.lock().unwrap();
            for spec in &TABLES {
                state.tables.insert(spec.name.to_string());
            }
        }
        for seed in &DEFAULT_USERS {
            fake.put_user(seed.to_new_user());
        }
        fake
    }

    fn put_user(&self, user: NewUser) {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let row = UserRow {
            id: state.next_id,
            username: user.username.clone(),
            full_name: user.full_name,
            role: user.role,
            password_hash: user.password_hash,
            is_active: user.is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        state.users.insert(user.username, row);
    }

    fn drop_table(&self, name: &str) {
        self.state.lock().unwrap().tables.remove(name);
    }

    fn disable_rpc(&self) {
        self.state.lock().unwrap().rpc_unavailable = true;
    }

    fn fail_probe(&self, table: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_probes
            .insert(table.to_string(), message.to_string());
    }

    fn fail_insert(&self, username: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_inserts
            .insert(username.to_string());
    }

    fn executed_sql(&self) -> Vec<String> {
        self.state.lock().unwrap().executed_sql.clone()
    }

    fn user(&self, username: &str) -> Option<UserRow> {
        self.state.lock().unwrap().users.get(username).cloned()
    }
}

impl SetupBackend for FakeBackend {
    async fn probe(&self, table: &str) -> Result<ProbeOutcome, SetupError> {
        let state = self.state.lock().unwrap();
        if let Some(message) = state.failing_probes.get(table) {
            return Err(SetupError::Postgrest(PostgrestError::new(
                "57014",
                message.as_str(),
            )));
        }
        if state.tables.contains(table) {
            Ok(ProbeOutcome::Responds)
        } else {
            Ok(ProbeOutcome::MissingRelation)
        }
    }

    async fn execute_sql(&self, statement: &str) -> Result<(), SetupError> {
        let mut state = self.state.lock().unwrap();
        state.executed_sql.push(statement.to_string());
        if state.rpc_unavailable {
            return Err(SetupError::Postgrest(PostgrestError::new(
                "PGRST202",
                "Could not find the function public.exec_sql in the schema cache",
            )));
        }
        for spec in &TABLES {
            if statement == spec.ddl {
                state.tables.insert(spec.name.to_string());
            }
        }
        Ok(())
    }

    async fn find_user(&self, username: &str) -> Result<Option<UserRow>, SetupError> {
        Ok(self.state.lock().unwrap().users.get(username).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<(), SetupError> {
        {
            let state = self.state.lock().unwrap();
            if state.failing_inserts.contains(&user.username) {
                return Err(SetupError::Postgrest(PostgrestError::new(
                    "23505",
                    "duplicate key value violates unique constraint \"users_username_key\"",
                )));
            }
        }
        self.put_user(user.clone());
        Ok(())
    }
}

#[tokio::test]
async fn fresh_backend_provisions_everything() {
    let fake = FakeBackend::fresh();
    let report = Provisioner::new(fake.clone()).run().await;

    assert_eq!(report.tables.len(), 4);
    for entry in &report.tables {
        assert_eq!(entry.outcome, TableOutcome::Created, "{}", entry.table.name);
    }
    assert_eq!(report.users.len(), 5);
    for entry in &report.users {
        assert_eq!(entry.outcome, UserOutcome::Created, "{}", entry.username);
    }
    assert_eq!(report.users_created(), 5);
    assert_eq!(report.users_existing(), 0);
    assert_eq!(fake.executed_sql().len(), 4);

    let rendered = report.to_string();
    assert!(rendered.contains("✅ users table created"));
    assert!(rendered.contains("✅ Created jayvee (admin)"));
    assert!(rendered.contains("📊 Created: 5, Already exists: 0"));
}

#[tokio::test]
async fn second_run_is_a_noop() {
    let fake = FakeBackend::fresh();
    let provisioner = Provisioner::new(fake.clone());
    provisioner.run().await;
    let report = provisioner.run().await;

    for entry in &report.tables {
        assert_eq!(
            entry.outcome,
            TableOutcome::AlreadyExists,
            "{}",
            entry.table.name
        );
    }
    assert_eq!(report.users_created(), 0);
    assert_eq!(report.users_existing(), 5);
    // No DDL beyond the first run's four statements.
    assert_eq!(fake.executed_sql().len(), 4);
}

#[tokio::test]
async fn only_the_missing_table_is_created() {
    let fake = FakeBackend::provisioned();
    fake.drop_table("penalties");
    let report = Provisioner::new(fake.clone()).run().await;

    let executed = fake.executed_sql();
    assert_eq!(executed.len(), 1);
    assert!(executed[0].contains("CREATE TABLE penalties"));
    for entry in &report.tables {
        let expected = if entry.table.name == "penalties" {
            TableOutcome::Created
        } else {
            TableOutcome::AlreadyExists
        };
        assert_eq!(entry.outcome, expected, "{}", entry.table.name);
    }
}

#[tokio::test]
async fn rpc_failure_degrades_to_manual_sql() {
    let fake = FakeBackend::fresh();
    fake.disable_rpc();
    let report = Provisioner::new(fake.clone()).run().await;

    for entry in &report.tables {
        assert_eq!(
            entry.outcome,
            TableOutcome::ManualSqlRequired,
            "{}",
            entry.table.name
        );
    }
    // The run carries on to user seeding regardless.
    assert_eq!(report.users_created(), 5);

    let rendered = report.to_string();
    assert!(rendered.contains("Run this SQL manually"));
    assert!(rendered.contains("CREATE TABLE monthly_collections ("));
}

#[tokio::test]
async fn one_failing_insert_does_not_stop_seeding() {
    let fake = FakeBackend::provisioned();
    {
        let mut state = fake.state.lock().unwrap();
        state.users.clear();
    }
    fake.fail_insert("christian");
    let report = Provisioner::new(fake.clone()).run().await;

    assert_eq!(report.users_created(), 4);
    assert_eq!(report.users_existing(), 0);
    let christian = report
        .users
        .iter()
        .find(|u| u.username == "christian")
        .unwrap();
    assert!(matches!(christian.outcome, UserOutcome::Failed(_)));
    assert!(fake.user("christian").is_none());
    assert!(fake.user("princess").is_some());

    let rendered = report.to_string();
    assert!(rendered.contains("❌ Failed to create christian"));
    assert!(rendered.contains("📊 Created: 4, Already exists: 0"));
}

#[tokio::test]
async fn probe_error_is_non_fatal() {
    let fake = FakeBackend::provisioned();
    fake.fail_probe("expenses", "canceling statement due to statement timeout");
    let report = Provisioner::new(fake.clone()).run().await;

    for entry in &report.tables {
        if entry.table.name == "expenses" {
            assert!(matches!(entry.outcome, TableOutcome::Failed(_)));
        } else {
            assert_eq!(
                entry.outcome,
                TableOutcome::AlreadyExists,
                "{}",
                entry.table.name
            );
        }
    }
    // No creation is attempted for a table whose probe failed outright.
    assert!(fake.executed_sql().is_empty());
    assert_eq!(report.users_existing(), 5);
}

#[tokio::test]
async fn existing_users_are_never_updated() {
    let fake = FakeBackend::provisioned();
    {
        let mut state = fake.state.lock().unwrap();
        let row = state.users.get_mut("jayvee").unwrap();
        row.full_name = "SOMEBODY ELSE".to_string();
        row.password_hash = "CHANGED".to_string();
    }
    let report = Provisioner::new(fake.clone()).run().await;

    let jayvee = report.users.iter().find(|u| u.username == "jayvee").unwrap();
    assert_eq!(jayvee.outcome, UserOutcome::AlreadyExists);
    let row = fake.user("jayvee").unwrap();
    assert_eq!(row.full_name, "SOMEBODY ELSE");
    assert_eq!(row.password_hash, "CHANGED");
}
