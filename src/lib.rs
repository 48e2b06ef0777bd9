// src/lib.rs

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod file;
pub mod log;
pub mod render;
pub mod runner;
pub mod store;

pub use error::{ReportError, Result};
