use fundbook_setup::db::seed::DEFAULT_USERS;
use fundbook_setup::{Config, Provisioner, SetupError, SupabaseClient};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("❌ Missing Supabase credentials: {err}");
            eprintln!("Create a .env file with:");
            eprintln!("SUPABASE_URL=https://your-project.supabase.co");
            eprintln!("SUPABASE_ANON_KEY=your-anon-key");
            eprintln!("SUPABASE_SERVICE_KEY=your-service-key");
            std::process::exit(1);
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    if let Err(err) = run(&cfg).await {
        eprintln!("\n❌ Setup failed: {err}");
        eprintln!("\n💡 Manual setup required:");
        eprintln!("   1. Open the Supabase SQL editor");
        eprintln!("   2. Run the statements from setup.sql");
        eprintln!("   3. Insert the default users by hand");
    }
}

async fn run(cfg: &Config) -> Result<(), SetupError> {
    println!("🚀 Starting Supabase database setup\n");

    let client = SupabaseClient::new(cfg)?;
    let provisioner = Provisioner::new(client);
    let report = provisioner.run().await;
    print!("{report}");

    println!("\n✅ Setup completed");
    println!("\n📝 Login credentials:");
    for seed in &DEFAULT_USERS {
        println!("   {}: {} / {}", seed.role.title(), seed.username, seed.password);
    }
    Ok(())
}
