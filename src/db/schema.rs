//! SQL DDL for the hosted Postgres schema.
//!
//! Each table is created exactly once; the statements here double as the
//! manual-fallback text printed when the `exec_sql` RPC is unavailable
//! (`setup.sql` at the repository root carries the same statements).

/// One provisionable table: its name and the DDL that creates it.
#[derive(Debug)]
pub struct TableSpec {
    pub name: &'static str,
    pub ddl: &'static str,
}

/// The fixed table set, in provisioning order.
pub static TABLES: [TableSpec; 4] = [
    TableSpec {
        name: "users",
        ddl: r#"CREATE TABLE users (
    id BIGSERIAL PRIMARY KEY,
    username VARCHAR(50) UNIQUE NOT NULL,
    full_name VARCHAR(100) NOT NULL,
    role VARCHAR(20) NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    is_active BOOLEAN DEFAULT true,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT TIMEZONE('utc'::text, NOW()),
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT TIMEZONE('utc'::text, NOW())
);"#,
    },
    TableSpec {
        name: "expenses",
        ddl: r#"CREATE TABLE expenses (
    id BIGSERIAL PRIMARY KEY,
    month VARCHAR(20) NOT NULL,
    entry_no VARCHAR(10),
    member_name VARCHAR(100),
    expense_date VARCHAR(20),
    purpose VARCHAR(200),
    quantity VARCHAR(10),
    amount DECIMAL(10,2),
    source_of_fund VARCHAR(50),
    created_at TIMESTAMP WITH TIME ZONE DEFAULT TIMEZONE('utc'::text, NOW()),
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT TIMEZONE('utc'::text, NOW()),
    created_by VARCHAR(50)
);"#,
    },
    TableSpec {
        name: "penalties",
        ddl: r#"CREATE TABLE penalties (
    id BIGSERIAL PRIMARY KEY,
    month VARCHAR(20) NOT NULL,
    entry_no VARCHAR(10),
    member_name VARCHAR(100),
    penalty_date VARCHAR(20),
    penalty_type VARCHAR(50),
    amount DECIMAL(10,2),
    signature VARCHAR(50),
    secretary_remark TEXT,
    is_paid BOOLEAN DEFAULT false,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT TIMEZONE('utc'::text, NOW()),
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT TIMEZONE('utc'::text, NOW())
);"#,
    },
    TableSpec {
        name: "monthly_collections",
        ddl: r#"CREATE TABLE monthly_collections (
    id BIGSERIAL PRIMARY KEY,
    month VARCHAR(20) NOT NULL,
    entry_no VARCHAR(10),
    member_name VARCHAR(100),
    collection_date VARCHAR(20),
    collection_type VARCHAR(10),
    amount DECIMAL(10,2),
    signature VARCHAR(50),
    secretary_remark TEXT,
    is_paid BOOLEAN DEFAULT false,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT TIMEZONE('utc'::text, NOW()),
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT TIMEZONE('utc'::text, NOW())
);"#,
    },
];
