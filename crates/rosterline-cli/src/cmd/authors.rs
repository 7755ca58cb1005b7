//! Authors subcommand - harvest author profiles per stored institution

use anyhow::Result;
use clap::Args;

use rosterline_core::SeenIds;
use rosterline_openalex::{harvest_institution_authors, HarvestedAuthor};
use rosterline_store::Store;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct AuthorsArgs {
    /// Authors to harvest per institution
    #[arg(long, default_value_t = 10)]
    pub per_institution: usize,

    /// Delete existing rows before inserting
    #[arg(long)]
    pub replace: bool,
}

pub fn run(args: AuthorsArgs, config: &Config) -> Result<()> {
    let mut store = Store::connect(&config.db)?;
    let institution_ids = store.list_institution_ids()?;
    if institution_ids.is_empty() {
        log::warn!("no institutions stored; run `rosterline institutions` first");
        return Ok(());
    }
    log::info!("harvesting authors for {} institutions", institution_ids.len());

    // One seen-set for the whole run: an author listed under several
    // institutions is harvested once, under the first one encountered.
    let mut seen = SeenIds::new();
    let mut all_authors: Vec<HarvestedAuthor> = Vec::new();
    for institution_id in &institution_ids {
        let (authors, stats) =
            harvest_institution_authors(&config.api, institution_id, args.per_institution, &mut seen);
        stats.log(institution_id);
        all_authors.extend(authors);
    }

    let inserted = store.upsert_authors(&all_authors, args.replace)?;
    log::info!(
        "stored {inserted} of {} authors across {} institutions",
        all_authors.len(),
        institution_ids.len()
    );
    Ok(())
}
