pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::toml_config::TomlConfig;
pub use config::{ConfigProvider, FailurePolicy};

pub use adapters::{
    http::HttpPageFetcher,
    report::{FileReport, TerminalTable},
    storage::LocalStorage,
};
pub use core::etl::SurveyEngine;
pub use domain::model::{AverageSalary, LanguageStats, Source, StatsTable, SurveyReport};
pub use utils::error::{EtlError, Result};
