//! Analytics over Olympic athlete-event records.
//!
//! Two tables go in: per-athlete-per-event rows (the `athlete_events` layout)
//! and NOC-to-region mappings. [`loader::load_dataset`] joins and normalizes
//! them into an immutable [`loader::Dataset`], [`cache::DatasetCache`] keeps
//! the most recent one keyed by content, and the view modules ([`kpi`],
//! [`medals`], [`participation`], [`athletes`]) aggregate a filtered subset
//! selected by [`filter::DashboardFilter`].

pub mod athletes;
pub mod cache;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod filter;
pub mod frequency;
pub mod io_utils;
pub mod kpi;
pub mod loader;
pub mod medals;
pub mod output;
pub mod participation;
pub mod schema;
pub mod table;
pub mod view;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::{cache::DatasetCache, cli::Cli};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("olympic_stats", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let cache = DatasetCache::new();
    dashboard::execute(&cli.command, &cache)
}
