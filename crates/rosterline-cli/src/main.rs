//! rosterline - harvest institution rosters from OpenAlex into PostgreSQL
//!
//! Three stages, each a subcommand: `institutions` searches and stores
//! institution records, `authors` harvests author profiles for every
//! stored institution, `publications` builds a title→abstract map from
//! the stored authors' publication lists.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "rosterline")]
#[command(about = "Harvest institution rosters from OpenAlex into PostgreSQL")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./rosterline.toml or ~/.config/rosterline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Search institutions and store them
    Institutions(cmd::institutions::InstitutionsArgs),
    /// Harvest authors for every stored institution
    Authors(cmd::authors::AuthorsArgs),
    /// Build the title→abstract map from stored publication lists
    Publications(cmd::publications::PublicationsArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    rosterline_core::init_logging(false, cli.debug);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Institutions(args) => cmd::institutions::run(args, &config),
        Command::Authors(args) => cmd::authors::run(args, &config),
        Command::Publications(args) => cmd::publications::run(args, &config),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec!["API base URL", &config.api.base_url]);
            table.add_row(vec!["Contact (mailto)", &config.api.mailto]);
            table.add_row(vec!["Page size", &config.api.per_page.to_string()]);
            table.add_row(vec!["DB host", &config.db.host]);
            table.add_row(vec!["DB port", &config.db.port.to_string()]);
            table.add_row(vec!["DB name", &config.db.database]);
            table.add_row(vec!["DB user", &config.db.user]);
            table.add_row(vec![
                "DB password",
                if config.db.password.is_some() {
                    "configured"
                } else {
                    "not set"
                },
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
