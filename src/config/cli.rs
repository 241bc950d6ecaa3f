use crate::config::{
    default_languages, ordered_sources, validate_provider, ConfigProvider, FailurePolicy,
    HeadHunterSettings, OutputSettings, SuperJobSettings, DEFAULT_QUERY_PREFIX,
};
use crate::domain::model::Source;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "salary-etl")]
#[command(about = "Compare programming salaries in Moscow across HeadHunter and SuperJob")]
pub struct CliConfig {
    /// Path to a TOML configuration file; replaces the survey flags below
    #[arg(short, long)]
    pub config: Option<String>,

    /// Languages to survey, in report order
    #[arg(long, value_delimiter = ',', default_values_t = default_languages())]
    pub languages: Vec<String>,

    /// Sources to query (headhunter/hh, superjob/sj); all when omitted
    #[arg(long, value_delimiter = ',')]
    pub sources: Vec<Source>,

    #[arg(long, default_value = DEFAULT_QUERY_PREFIX)]
    pub query_prefix: String,

    #[arg(long, env = "SUPERJOB_SECRET_KEY", hide_env_values = true)]
    pub superjob_secret_key: Option<String>,

    #[arg(long, default_value = "https://api.hh.ru/vacancies")]
    pub hh_endpoint: String,

    #[arg(long, default_value = "https://api.superjob.ru/2.0/vacancies/")]
    pub sj_endpoint: String,

    /// HeadHunter area id (1 = Moscow)
    #[arg(long, default_value = "1")]
    pub hh_area: u32,

    /// Only vacancies published within this many days
    #[arg(long, default_value = "30")]
    pub hh_period: u32,

    #[arg(long, default_value = "1.221")]
    pub hh_specialization: String,

    #[arg(long, default_value = "Москва")]
    pub sj_town: String,

    /// SuperJob catalogue id (48 = programming)
    #[arg(long, default_value = "48")]
    pub sj_catalogue: u32,

    #[arg(long, default_value = "100")]
    pub per_page: u32,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    /// Directory for CSV/JSON reports; terminal table only when omitted
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub output_formats: Vec<String>,

    /// Bundle each source's report files into a ZIP archive
    #[arg(long)]
    pub compress: bool,

    /// Stop at the first unavailable source instead of skipping it
    #[arg(long)]
    pub fail_fast: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn languages(&self) -> &[String] {
        &self.languages
    }

    fn sources(&self) -> Vec<Source> {
        ordered_sources(&self.sources)
    }

    fn query_prefix(&self) -> &str {
        &self.query_prefix
    }

    fn headhunter(&self) -> HeadHunterSettings {
        HeadHunterSettings {
            endpoint: self.hh_endpoint.clone(),
            area: self.hh_area,
            period: self.hh_period,
            specialization: Some(self.hh_specialization.clone()).filter(|s| !s.is_empty()),
            per_page: self.per_page,
        }
    }

    fn superjob(&self) -> SuperJobSettings {
        SuperJobSettings {
            endpoint: self.sj_endpoint.clone(),
            secret_key: self.superjob_secret_key.clone(),
            town: self.sj_town.clone(),
            catalogue: self.sj_catalogue,
            per_page: self.per_page,
        }
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn output(&self) -> OutputSettings {
        OutputSettings {
            output_path: self.output_path.clone(),
            output_formats: self.output_formats.clone(),
            compress: self.compress,
        }
    }

    fn failure_policy(&self) -> FailurePolicy {
        if self.fail_fast {
            FailurePolicy::Abort
        } else {
            FailurePolicy::SkipSource
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
