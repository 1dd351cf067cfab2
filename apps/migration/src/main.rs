//! Migration CLI tool.
//!
//! `migration up` creates the posts table; `migration status` lists what ran.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI installs its own tracing subscriber (`-v` for debug output).
    cli::run_cli(migration::Migrator).await;
}
