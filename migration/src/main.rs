use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    // The CLI reads DATABASE_URL; deployments set DB_USER / DB_PASSWORD /
    // DB_NAME / DB_HOST instead, so assemble the URL for them.
    if std::env::var("DATABASE_URL").is_err() {
        if let Some(url) = migration::env_database_url() {
            std::env::set_var("DATABASE_URL", url);
        }
    }

    cli::run_cli(migration::Migrator).await;
}
