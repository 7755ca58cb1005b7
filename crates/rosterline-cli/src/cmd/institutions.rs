//! Institutions subcommand - search OpenAlex and store matches

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use rosterline_openalex::{search_institutions, InstitutionRow};
use rosterline_store::Store;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct InstitutionsArgs {
    /// Search query, e.g. "University of Virginia"
    #[arg(short, long)]
    pub search: String,

    /// Maximum institutions to fetch
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// 1-based indices to drop from the fetched list, e.g. --exclude 1,3
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<usize>,

    /// Delete existing rows before inserting
    #[arg(long)]
    pub replace: bool,
}

pub fn run(args: InstitutionsArgs, config: &Config) -> Result<()> {
    let found = search_institutions(&config.api, &args.search, args.limit);
    if found.is_empty() {
        log::warn!("no institutions matched '{}'", args.search);
        return Ok(());
    }
    print_institutions(&found);

    let kept = apply_exclusions(found, &args.exclude);

    let mut store = Store::connect(&config.db)?;
    let inserted = store.upsert_institutions(&kept, args.replace)?;
    log::info!(
        "stored {inserted} of {} institutions ({} already present)",
        kept.len(),
        kept.len() as u64 - inserted
    );
    Ok(())
}

/// Drop 1-based indices from the list; out-of-range indices are ignored
/// with a warning. Indexing matches the printed table.
fn apply_exclusions(institutions: Vec<InstitutionRow>, exclude: &[usize]) -> Vec<InstitutionRow> {
    for &idx in exclude {
        if idx == 0 || idx > institutions.len() {
            log::warn!("--exclude index {idx} out of range, ignoring");
        }
    }
    institutions
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !exclude.contains(&(i + 1)))
        .map(|(_, inst)| inst)
        .collect()
}

fn print_institutions(institutions: &[InstitutionRow]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("OpenAlex ID").fg(Color::Cyan),
            Cell::new("ROR").fg(Color::Cyan),
            Cell::new("Country").fg(Color::Cyan),
        ]);
    for (i, inst) in institutions.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            inst.display_name.clone(),
            inst.id.clone(),
            inst.ror.clone().unwrap_or_default(),
            inst.country_code.clone().unwrap_or_default(),
        ]);
    }
    eprintln!("\n{table}");
}
