//! The store: one connection, transactional batch upserts

use anyhow::{Context, Result};
use postgres::NoTls;

use rosterline_openalex::{HarvestedAuthor, InstitutionRow};

use crate::config::DbConfig;
use crate::sql;

/// Wrapper around one blocking PostgreSQL connection.
///
/// Opened once per top-level invocation and dropped at the end; not
/// pooled. Batch writes run inside a single transaction — either every
/// insert commits or the transaction rolls back on drop, leaving the
/// table as it was.
pub struct Store {
    client: postgres::Client,
}

impl Store {
    pub fn connect(cfg: &DbConfig) -> Result<Self> {
        let mut pg = postgres::Config::new();
        pg.host(&cfg.host)
            .port(cfg.port)
            .dbname(&cfg.database)
            .user(&cfg.user);
        if let Some(password) = &cfg.password {
            pg.password(password);
        }
        let client = pg.connect(NoTls).with_context(|| {
            format!(
                "failed to connect to {}@{}:{}/{}",
                cfg.user, cfg.host, cfg.port, cfg.database
            )
        })?;
        log::debug!(
            "connected to {}:{}/{}",
            cfg.host,
            cfg.port,
            cfg.database
        );
        Ok(Self { client })
    }

    /// Upsert a batch of institutions. Returns rows actually inserted;
    /// conflicting ids are skipped, the existing row wins.
    pub fn upsert_institutions(
        &mut self,
        institutions: &[InstitutionRow],
        replace: bool,
    ) -> Result<u64> {
        let mut tx = self.client.transaction().context("begin transaction")?;
        if replace {
            let removed = tx
                .execute(sql::DELETE_INSTITUTIONS, &[])
                .context("clear institutions")?;
            log::info!("cleared {removed} existing institutions");
        }
        let mut inserted = 0u64;
        for inst in institutions {
            inserted += tx
                .execute(
                    sql::INSERT_INSTITUTION,
                    &[&inst.display_name, &inst.id, &inst.ror, &inst.country_code],
                )
                .with_context(|| format!("insert institution {}", inst.id))?;
        }
        tx.commit().context("commit institutions")?;
        Ok(inserted)
    }

    /// Upsert a batch of harvested authors. Same conflict-skip semantics:
    /// an author discovered under multiple institutions keeps the
    /// association from whichever record reached the store first.
    pub fn upsert_authors(&mut self, authors: &[HarvestedAuthor], replace: bool) -> Result<u64> {
        let mut tx = self.client.transaction().context("begin transaction")?;
        if replace {
            let removed = tx
                .execute(sql::DELETE_AUTHORS, &[])
                .context("clear authors")?;
            log::info!("cleared {removed} existing authors");
        }
        let mut inserted = 0u64;
        for record in authors {
            let author = &record.author;
            let publications = serde_json::to_value(&record.publications)?;
            inserted += tx
                .execute(
                    sql::INSERT_AUTHOR,
                    &[
                        &author.id,
                        &author.display_name,
                        &author.orcid,
                        &author.works_count,
                        &author.cited_by_count,
                        &author.counts_by_year,
                        &author.works_api_url,
                        &author.cited_by_api_url,
                        &author.affiliations,
                        &author.h_index(),
                        &author.i10_index(),
                        &publications,
                        &author.updated_date,
                        &record.institution_id,
                    ],
                )
                .with_context(|| format!("insert author {}", author.id))?;
        }
        tx.commit().context("commit authors")?;
        Ok(inserted)
    }

    /// Institution ids in listing order; the authors stage iterates these.
    pub fn list_institution_ids(&mut self) -> Result<Vec<String>> {
        let rows = self
            .client
            .query(sql::SELECT_INSTITUTION_IDS, &[])
            .context("list institutions")?;
        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    /// Author ids with their stored publication id lists.
    ///
    /// A publications column that is not a JSON array is logged and that
    /// author skipped; the rest of the listing continues.
    pub fn list_author_publications(&mut self) -> Result<Vec<(String, Vec<String>)>> {
        let rows = self
            .client
            .query(sql::SELECT_AUTHOR_PUBLICATIONS, &[])
            .context("list author publications")?;

        let mut listings = Vec::with_capacity(rows.len());
        for row in &rows {
            let author_id: String = row.try_get(0)?;
            let value: Option<serde_json::Value> = row.try_get(1)?;
            let Some(array) = value.as_ref().and_then(|v| v.as_array()) else {
                log::warn!("author {author_id}: publications is not a list, skipping");
                continue;
            };
            let ids: Vec<String> = array
                .iter()
                .filter_map(|v| v.as_str())
                .map(String::from)
                .collect();
            listings.push((author_id, ids));
        }
        Ok(listings)
    }
}
