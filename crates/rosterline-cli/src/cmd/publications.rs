//! Publications subcommand - title→abstract map from stored authors
//!
//! Publications are fetched transiently; nothing is written back to the
//! database. The map goes to a JSON file when --output is given,
//! otherwise titles are printed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use rosterline_openalex::PublicationCache;
use rosterline_store::Store;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct PublicationsArgs {
    /// Write the title→abstract map to this file as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: PublicationsArgs, config: &Config) -> Result<()> {
    let mut store = Store::connect(&config.db)?;
    let listings = store.list_author_publications()?;
    if listings.is_empty() {
        log::warn!("no authors stored; run `rosterline authors` first");
        return Ok(());
    }

    // Cache spans the run: shared publications are fetched once even when
    // several authors list the same work.
    let mut cache = PublicationCache::new();
    let mut map = serde_json::Map::new();
    for (author_id, work_ids) in &listings {
        log::debug!("{author_id}: {} publications", work_ids.len());
        for work_id in work_ids {
            if let Some(publication) = cache.get(&config.api, work_id) {
                // Two works sharing a title: first abstract wins, same
                // first-wins rule as the store's conflict-skip inserts
                map.entry(publication.title.clone())
                    .or_insert_with(|| publication.abstract_text.clone().into());
            }
        }
    }

    log::info!(
        "{} title/abstract pairs from {} distinct works across {} authors",
        map.len(),
        cache.len(),
        listings.len()
    );

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&serde_json::Value::Object(map))?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    } else {
        for title in map.keys() {
            println!("{title}");
        }
    }
    Ok(())
}
