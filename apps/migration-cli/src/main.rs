use std::str::FromStr;

use bolao::config::db::DbProfile;
use bolao::infra::db::connect_db;
use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};

#[derive(Clone, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Bolão database migration tool")]
struct Args {
    /// Migration command: up | down | fresh | reset | refresh | status
    command: String,

    /// Database type
    #[arg(
        short,
        long,
        value_enum,
        default_value = "sqlite-file",
        help = "Database type: postgres, sqlite-file"
    )]
    db: Db,

    /// SQLite file path (defaults to DB_PATH or palpites_v2.db)
    #[arg(short, long)]
    file: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.to_string().contains("invalid value") && e.to_string().contains("--db") {
                eprintln!("❌ Unsupported database type provided.");
                eprintln!();
                eprintln!("In-memory SQLite is not supported here: the database disappears");
                eprintln!("when the command exits.");
                eprintln!();
                eprintln!("Supported database types:");
                eprintln!("  • postgres    - PostgreSQL database");
                eprintln!("  • sqlite-file - SQLite file database");
                std::process::exit(1);
            }
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let command = match MigrationCommand::from_str(&args.command) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let profile = match args.db {
        Db::Postgres => DbProfile::Postgres,
        Db::SqliteFile => match args.file {
            Some(file) => DbProfile::SqliteFile { file },
            None => match DbProfile::from_env() {
                Ok(profile @ DbProfile::SqliteFile { .. }) => profile,
                _ => DbProfile::SqliteFile {
                    file: "palpites_v2.db".to_string(),
                },
            },
        },
    };

    let conn = match connect_db(&profile).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("❌ Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, command).await {
        eprintln!("❌ Migration failed: {e}");
        std::process::exit(1);
    }
    println!("✅ Migration command completed");
}
