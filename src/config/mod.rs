#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::Source;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_allowed_values, validate_languages, validate_non_empty_string, validate_path,
    validate_range, validate_required_field, validate_url,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_LANGUAGES: [&str; 10] = [
    "JavaScript",
    "Python",
    "Java",
    "TypeScript",
    "C#",
    "PHP",
    "C++",
    "Kotlin",
    "Swift",
    "Go",
];

pub const DEFAULT_QUERY_PREFIX: &str = "Программист";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

pub fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadHunterSettings {
    pub endpoint: String,
    pub area: u32,
    pub period: u32,
    pub specialization: Option<String>,
    pub per_page: u32,
}

impl Default for HeadHunterSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.hh.ru/vacancies".to_string(),
            area: 1,
            period: 30,
            specialization: Some("1.221".to_string()),
            per_page: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuperJobSettings {
    pub endpoint: String,
    /// 不檢查格式，原樣放進 `X-Api-App-Id`
    pub secret_key: Option<String>,
    pub town: String,
    pub catalogue: u32,
    pub per_page: u32,
}

impl Default for SuperJobSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.superjob.ru/2.0/vacancies/".to_string(),
            secret_key: None,
            town: "Москва".to_string(),
            catalogue: 48,
            per_page: 100,
        }
    }
}

/// 來源失敗時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// 標記該來源失敗，保留已完成的語言，繼續下一個來源
    #[default]
    SkipSource,
    Abort,
}

/// 報表輸出設定；`output_path` 為空時只輸出終端表格
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputSettings {
    pub output_path: Option<String>,
    pub output_formats: Vec<String>,
    pub compress: bool,
}

pub trait ConfigProvider: Send + Sync {
    fn languages(&self) -> &[String];
    fn sources(&self) -> Vec<Source>;
    fn query_prefix(&self) -> &str;
    fn headhunter(&self) -> HeadHunterSettings;
    fn superjob(&self) -> SuperJobSettings;
    fn request_timeout(&self) -> Duration;
    fn output(&self) -> OutputSettings;
    fn failure_policy(&self) -> FailurePolicy;
}

/// 依宣告順序（HeadHunter 在前）去重後的來源清單；空清單代表全部
pub fn ordered_sources(selected: &[Source]) -> Vec<Source> {
    if selected.is_empty() {
        return Source::ALL.to_vec();
    }
    Source::ALL
        .into_iter()
        .filter(|source| selected.contains(source))
        .collect()
}

/// 兩種設定來源共用的檢查
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_languages("survey.languages", config.languages())?;
    validate_non_empty_string("survey.query_prefix", config.query_prefix())?;
    validate_range(
        "survey.timeout_seconds",
        config.request_timeout().as_secs(),
        1,
        300,
    )?;

    let sources = config.sources();
    if sources.contains(&Source::HeadHunter) {
        let hh = config.headhunter();
        validate_url("headhunter.endpoint", &hh.endpoint)?;
        validate_range("headhunter.per_page", hh.per_page, 1, 100)?;
    }

    if sources.contains(&Source::SuperJob) {
        let sj = config.superjob();
        validate_url("superjob.endpoint", &sj.endpoint)?;
        validate_range("superjob.per_page", sj.per_page, 1, 100)?;
        let key = validate_required_field("superjob.secret_key", &sj.secret_key)?;
        validate_non_empty_string("superjob.secret_key", key)?;
    }

    let output = config.output();
    if let Some(path) = &output.output_path {
        validate_path("load.output_path", path)?;
        validate_allowed_values("load.output_formats", &output.output_formats, &OUTPUT_FORMATS)?;
    }

    Ok(())
}
