// src/render.rs
//! Report rendering.
//!
//! The page skeleton lives in `<template_dir>/report.tmpl.html` and carries
//! `{{ slot }}` placeholders. The table fragments are built here and dropped
//! into the slots; unknown placeholders are left as they are.
//!
//! Slots: `ga_property_code`, `ga_snippet`, `css_filename`, `rendered_at`,
//! `panelist_count`, `year_headers`, `panelist_rows`.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::aggregate::{count_in, PanelistSummary, Summaries, YearCount};
use crate::config::consts::{DEFAULT_TEMPLATE_DIR, RENDERED_AT_FORMAT, REPORT_TEMPLATE};
use crate::config::ReportSettings;
use crate::error::{ReportError, Result};

/// Where templates come from and which zone the footer timestamp uses.
#[derive(Clone, Debug)]
pub struct RenderContext {
    pub template_dir: PathBuf,
    pub time_zone: Tz,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            time_zone: chrono_tz::America::Los_Angeles,
        }
    }
}

impl RenderContext {
    pub fn new(template_dir: impl Into<PathBuf>, time_zone: Tz) -> Self {
        Self { template_dir: template_dir.into(), time_zone }
    }

    /// Wall-clock time in the report zone.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.time_zone)
    }

    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(REPORT_TEMPLATE)
    }

    fn load_template(&self) -> Result<String> {
        let path = self.template_path();
        if !path.is_file() {
            return Err(ReportError::TemplateNotFound { path });
        }
        fs::read_to_string(&path).map_err(|e| ReportError::io(path, e))
    }

    /// Render the report page. A missing template is fatal.
    pub fn render(
        &self,
        show_years: &[i32],
        summaries: &Summaries,
        settings: &ReportSettings,
        rendered_at: &DateTime<Tz>,
    ) -> Result<String> {
        let template = self.load_template()?;
        let data = build_render_data(show_years, summaries, settings, rendered_at);
        log::debug!(
            "Rendering {} with {} panelists over {} years",
            self.template_path().display(),
            data.panelists.len(),
            data.show_years.len()
        );
        Ok(fill_template(&template, &data))
    }
}

/* ---------------- Data handed to the template ---------------- */

#[derive(Clone, Debug, Serialize)]
pub struct PanelistRow<'a> {
    pub name: &'a str,
    pub appearances: &'a [YearCount],
    pub total: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct RenderData<'a> {
    pub show_years: &'a [i32],
    pub panelists: Vec<PanelistRow<'a>>,
    pub settings: &'a ReportSettings,
    pub rendered_at: String,
}

pub fn build_render_data<'a>(
    show_years: &'a [i32],
    summaries: &'a Summaries,
    settings: &'a ReportSettings,
    rendered_at: &DateTime<Tz>,
) -> RenderData<'a> {
    let panelists = summaries
        .values()
        .map(|s: &PanelistSummary| PanelistRow {
            name: &s.name,
            appearances: &s.years,
            total: s.total,
        })
        .collect();

    RenderData {
        show_years,
        panelists,
        settings,
        rendered_at: format_rendered_at(rendered_at),
    }
}

/// e.g. `Tuesday, March 05, 2019 14:02:03 PST`
pub fn format_rendered_at(at: &DateTime<Tz>) -> String {
    at.format(RENDERED_AT_FORMAT).to_string()
}

/* ---------------- Slot filling ---------------- */

fn fill_template(template: &str, data: &RenderData<'_>) -> String {
    let slots: [(&str, String); 7] = [
        ("ga_property_code", html_escape(&data.settings.ga_property_code)),
        ("ga_snippet", ga_snippet(&data.settings.ga_property_code)),
        ("css_filename", html_escape(&data.settings.css_filename)),
        ("rendered_at", html_escape(&data.rendered_at)),
        ("panelist_count", data.panelists.len().to_string()),
        ("year_headers", year_headers(data.show_years)),
        ("panelist_rows", panelist_rows(data)),
    ];

    // Single pass: slot values are copied as-is and never re-scanned.
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            rest = &rest[open..];
            break;
        };
        let name = after[..close].trim();
        match slots.iter().find(|(slot, _)| *slot == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

fn year_headers(years: &[i32]) -> String {
    let mut out = String::from("<th>Panelist</th>");
    for y in years {
        let _ = write!(out, "<th>{y}</th>");
    }
    out.push_str("<th>Total</th>");
    out
}

fn panelist_rows(data: &RenderData<'_>) -> String {
    let mut out = String::new();
    for p in &data.panelists {
        let _ = write!(out, "<tr><td class=\"panelist\">{}</td>", html_escape(p.name));
        for y in data.show_years {
            match count_in(p.appearances, *y) {
                Some(count) => {
                    let _ = write!(out, "<td>{count}</td>");
                }
                None => out.push_str("<td class=\"none\"></td>"),
            }
        }
        let _ = writeln!(out, "<td class=\"total\">{}</td></tr>", p.total);
    }
    out
}

fn ga_snippet(code: &str) -> String {
    if code.trim().is_empty() {
        return String::new();
    }
    let code = html_escape(code.trim());
    format!(
        r#"<script async src="https://www.googletagmanager.com/gtag/js?id={code}"></script>
<script>
window.dataLayer = window.dataLayer || [];
function gtag(){{dataLayer.push(arguments);}}
gtag('js', new Date());
gtag('config', '{code}');
</script>"#
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
