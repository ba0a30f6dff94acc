//! CLI utilities for lector.
//!
//! Context configuration stored as YAML and output helpers shared by the
//! `lector` binary.

pub mod config;
pub mod output;

pub use config::{Config, Context, load_config, mask_api_key};
pub use output::{Output, OutputFormat, write_binary};
