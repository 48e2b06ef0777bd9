// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::config::consts::{DEFAULT_CONFIG_FILE, DEFAULT_TEMPLATE_DIR};
use crate::config::{load_config_file, resolve_config, ReportOverrides};
use crate::error::Result;
use crate::render::RenderContext;
use crate::runner::{self, Output, RunOptions, RunSummary};
use crate::store::SqliteStore;

#[derive(Parser, Debug, Clone)]
#[command(name = "panelist_report")]
#[command(about = "Render the panelist appearance report", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file with `database` and `report` sections
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding report.tmpl.html
    #[arg(long, default_value = DEFAULT_TEMPLATE_DIR)]
    pub template_dir: PathBuf,

    /// Google Analytics property code (overrides config)
    #[arg(long)]
    pub ga_property_code: Option<String>,

    /// Directory containing the stylesheet (overrides config)
    #[arg(long)]
    pub css_directory: Option<String>,

    /// Stylesheet file name (overrides config)
    #[arg(long)]
    pub css_filename: Option<String>,

    /// Directory the report is written to (overrides config)
    #[arg(long)]
    pub output_directory: Option<String>,

    /// Report file name (overrides config)
    #[arg(long)]
    pub output_filename: Option<String>,

    /// Only report on this panelist id; repeat for several
    #[arg(long = "panelist", value_name = "ID")]
    pub panelists: Vec<i64>,

    /// Print the report to stdout instead of writing the output directory
    #[arg(long)]
    pub stdout: bool,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> ReportOverrides {
        ReportOverrides {
            ga_property_code: self.ga_property_code.clone(),
            css_directory: self.css_directory.clone(),
            css_filename: self.css_filename.clone(),
            output_directory: self.output_directory.clone(),
            output_filename: self.output_filename.clone(),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            output: if self.stdout { Output::Stdout } else { Output::Publish },
            panelist_ids: self.panelists.clone(),
        }
    }
}

/// Load config, open the store, and produce the report.
pub fn run(cli: &Cli) -> Result<RunSummary> {
    let app_config = load_config_file(&cli.config)?;
    let settings = resolve_config(&app_config.report, &cli.overrides());
    log::debug!("Resolved settings: {settings:?}");

    let store = SqliteStore::open(&app_config.database.path)?;
    let ctx = RenderContext {
        template_dir: cli.template_dir.clone(),
        ..RenderContext::default()
    };

    runner::run(&store, &ctx, &settings, &cli.run_options())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flags_are_not_overrides() {
        let cli = Cli::parse_from(["panelist_report"]);
        assert_eq!(cli.overrides(), ReportOverrides::default());
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(cli.run_options().output, Output::Publish);
    }

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::parse_from([
            "panelist_report",
            "--css-directory",
            "./custom",
            "--output-filename",
            "report.html",
            "--panelist",
            "3",
            "--panelist",
            "7",
            "--stdout",
        ]);
        let o = cli.overrides();
        assert_eq!(o.css_directory.as_deref(), Some("./custom"));
        assert_eq!(o.output_filename.as_deref(), Some("report.html"));
        assert_eq!(o.ga_property_code, None);
        let opts = cli.run_options();
        assert_eq!(opts.panelist_ids, vec![3, 7]);
        assert_eq!(opts.output, Output::Stdout);
    }
}
