use std::{error::Error, process};

use clap::Parser;
use ledger::{Amount, Repository, render};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

use dispatch::{Command, Parsed};

mod dispatch;
mod settings;

const DEFAULT_DATABASE_URL: &str = "sqlite:./spesa.db?mode=rwc";

#[derive(Parser, Debug)]
#[command(name = "spesa")]
#[command(about = "Command-line expense tracker")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Command and its arguments: list | add AMOUNT MEMO | search QUERY |
    /// delete ID | clear
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match settings::Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spesa={level},ledger={level}",
            level = settings.log.as_deref().unwrap_or("warn")
        ))
        .with_writer(std::io::stderr)
        .init();

    match dispatch::parse(&cli.args) {
        Parsed::Help => print!("{}", dispatch::HELP),
        // Usage problems are reported but do not escalate to a failure exit.
        Parsed::Usage(message) => println!("{message}"),
        Parsed::Command(command) => {
            let database_url = cli
                .database_url
                .or(settings.database)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

            if let Err(err) = run(command, &database_url).await {
                eprintln!("Error: {err}");
                process::exit(1);
            }
        }
    }
}

/// Executes one repository-backed command: connect, ensure the schema,
/// operate, print. The connection is scoped to this single invocation.
async fn run(command: Command, database_url: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let db = connect_db(database_url).await?;
    let repository = Repository::new(db);

    match command {
        Command::List => println!("{}", render(&repository.list().await?)),
        Command::Add { amount, memo } => {
            let amount: Amount = amount.parse()?;
            repository.add(amount, &memo).await?;
        }
        Command::Search { pattern } => {
            println!("{}", render(&repository.search(&pattern).await?));
        }
        Command::Delete { id } => match repository.delete_by_id(&id).await? {
            Some(expense) => {
                println!("The following expense has been deleted:");
                println!("{expense}");
            }
            None => println!("There is no expense with the id '{id}'."),
        },
        Command::Clear => {
            let stdin = std::io::stdin();
            let confirmed = dispatch::confirm_clear(&mut stdin.lock(), &mut std::io::stdout())?;
            if confirmed {
                repository.delete_all().await?;
                println!("All expenses have been deleted.");
            }
        }
    }

    Ok(())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::debug!(database_url, "connected, schema ensured");
    Ok(db)
}
