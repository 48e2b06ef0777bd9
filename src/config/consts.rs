// src/config/consts.rs

// Config file
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

// Render
pub const DEFAULT_TEMPLATE_DIR: &str = "template";
pub const REPORT_TEMPLATE: &str = "report.tmpl.html";
pub const RENDERED_AT_FORMAT: &str = "%A, %B %d, %Y %H:%M:%S %Z";

// Export
pub const DEFAULT_CSS_DIR: &str = "css";
pub const DEFAULT_CSS_FILE: &str = "style.css";
pub const DEFAULT_OUT_DIR: &str = "output";
pub const DEFAULT_OUT_FILE: &str = "index.html";
