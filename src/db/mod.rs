//! Database definitions: table DDL, row models and the default seed data.
//!
//! Layout:
//! - `schema.rs`: the fixed table set with its SQL DDL
//! - `models.rs`: Rust structs mirroring the `users` table rows
//! - `seed.rs`: the default accounts created on first setup

pub mod models;
pub mod schema;
pub mod seed;

pub use models::{NewUser, Role, UserRow};
pub use schema::{TABLES, TableSpec};
pub use seed::{DEFAULT_USERS, SeedUser};
