//! shard-sql CLI
//!
//! Analyzes logical SELECT statements the way a sharding router does.

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use shard_sql_cli::config::table_map;
use shard_sql_cli::{DialectKind, Report, analyze, read_sql, rewrite, rewrite_routed};

/// SELECT analysis and per-shard rewriting.
#[derive(Parser)]
#[command(name = "shard-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dialect of the input.
    #[arg(short, long, env = "SHARD_SQL_DIALECT", value_enum, default_value_t)]
    dialect: DialectKind,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show items, tables, keys and rewrite tokens.
    Analyze {
        /// Query text (read from stdin if omitted).
        sql: Option<String>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Table route as `logical=physical`; adds the rewritten SQL.
        #[arg(short, long = "table")]
        tables: Vec<String>,
    },

    /// Print the query as sent to one shard.
    Rewrite {
        /// Query text (read from stdin if omitted).
        sql: Option<String>,

        /// Table route as `logical=physical`; repeatable.
        #[arg(short, long = "table")]
        tables: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect = cli.dialect;

    match cli.command {
        Commands::Analyze { sql, json, tables } => {
            let tables = table_map(&tables)?;
            let sql = read_sql(sql)?;
            let statement = analyze(&sql, dialect)?;
            let rewritten = rewrite_routed(&sql, &statement, &tables);
            let report = Report {
                dialect: dialect.name(),
                statement: &statement,
                rewritten: rewritten.as_deref(),
            };
            if json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", report.to_text());
            }
        }

        Commands::Rewrite { sql, tables } => {
            let tables = table_map(&tables)?;
            let sql = read_sql(sql)?;
            let statement = analyze(&sql, dialect)?;
            println!("{}", rewrite(&sql, &statement, &tables));
        }
    }

    Ok(())
}
