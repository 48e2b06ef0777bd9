// src/runner.rs
use std::io::Write;
use std::path::PathBuf;

use crate::{
    aggregate::{aggregate, distinct_years, AppearanceRecord, Summaries},
    config::ReportSettings,
    error::{ReportError, Result},
    file::publish,
    render::RenderContext,
    store::AppearanceSource,
};

/// Where the rendered document goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Output {
    /// Output directory from the settings, plus the stylesheet.
    #[default]
    Publish,
    /// Standard output only; nothing is written to disk.
    Stdout,
}

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub output: Output,
    /// Restrict the report to these panelist ids. Empty means everyone.
    pub panelist_ids: Vec<i64>,
}

/// Summary of what was produced.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub panelists: usize,
    pub years: usize,
}

/// One report run: query, aggregate, render, write.
pub fn run(
    store: &dyn AppearanceSource,
    ctx: &RenderContext,
    settings: &ReportSettings,
    opts: &RunOptions,
) -> Result<RunSummary> {
    let summaries = collect_summaries(store, &opts.panelist_ids)?;
    let show_years = distinct_years(store.show_years()?);
    log::info!(
        "Aggregated {} panelists across {} show years",
        summaries.len(),
        show_years.len()
    );

    let document = ctx.render(&show_years, &summaries, settings, &ctx.now())?;

    let mut summary = RunSummary {
        files_written: Vec::new(),
        panelists: summaries.len(),
        years: show_years.len(),
    };

    match opts.output {
        Output::Publish => {
            let published = publish(&document, settings)?;
            summary.files_written.push(published.document);
            summary.files_written.push(published.stylesheet);
        }
        Output::Stdout => {
            let mut out = std::io::stdout().lock();
            out.write_all(document.as_bytes())
                .and_then(|_| out.flush())
                .map_err(|e| ReportError::io("<stdout>", e))?;
        }
    }

    Ok(summary)
}

/// Aggregated appearances, for everyone or for the selected panelists.
pub fn collect_summaries(store: &dyn AppearanceSource, panelist_ids: &[i64]) -> Result<Summaries> {
    if panelist_ids.is_empty() {
        return Ok(aggregate(store.appearances()?));
    }

    // A repeated id would double its counts once aggregated.
    let mut ids = panelist_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    let known = store.panelists()?;
    let mut records: Vec<AppearanceRecord> = Vec::new();
    for id in &ids {
        match known.iter().find(|p| p.id == *id) {
            Some(p) => {
                log::debug!("Collecting appearances for {} ({})", p.name, p.id);
                records.extend(store.appearances_for(*id)?);
            }
            None => log::warn!("Panelist {id} has no countable appearances; skipped"),
        }
    }
    Ok(aggregate(records))
}
