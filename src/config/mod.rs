// src/config/mod.rs

pub mod consts;
pub mod options;

pub use options::{
    load_config_file, parse_config, resolve_config, AppConfig, DatabaseConfig, ReportOverrides,
    ReportSettings,
};
