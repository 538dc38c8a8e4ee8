use clap::Parser;
use homestead::{settings, storage, web};
use migration::MigratorTrait;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "homestead", version, about = "Property catalogue API")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    // load settings
    let mut settings = settings::Settings::load(&cli.config)?;
    if settings.apply_env_credentials() {
        tracing::info!("Database credentials taken from DB_* environment");
    }
    tracing::info!(?settings, "Loaded configuration");

    // init storage (database)
    let db = storage::init(&settings.database).await.into_diagnostic()?;

    // apply pending migrations so a fresh database is usable
    migration::Migrator::up(&db, None).await.into_diagnostic()?;

    // start web server
    web::serve(settings, db).await?;
    Ok(())
}
