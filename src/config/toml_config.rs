use crate::config::{
    default_languages, ordered_sources, validate_provider, ConfigProvider, FailurePolicy,
    HeadHunterSettings, OutputSettings, SuperJobSettings, DEFAULT_QUERY_PREFIX,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::domain::model::Source;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub survey: SurveySection,
    #[serde(default)]
    pub headhunter: HeadHunterSettings,
    #[serde(default)]
    pub superjob: SuperJobSettings,
    pub load: Option<LoadSection>,
    pub error_handling: Option<ErrorHandlingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveySection {
    pub languages: Vec<String>,
    pub sources: Vec<Source>,
    pub query_prefix: String,
    pub timeout_seconds: u64,
}

impl Default for SurveySection {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            sources: Vec::new(),
            query_prefix: DEFAULT_QUERY_PREFIX.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSection {
    pub output_path: String,
    pub output_formats: Option<Vec<String>>,
    pub compress: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingSection {
    pub on_source_failure: Option<FailurePolicy>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPERJOB_SECRET_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn languages(&self) -> &[String] {
        &self.survey.languages
    }

    fn sources(&self) -> Vec<Source> {
        ordered_sources(&self.survey.sources)
    }

    fn query_prefix(&self) -> &str {
        &self.survey.query_prefix
    }

    fn headhunter(&self) -> HeadHunterSettings {
        self.headhunter.clone()
    }

    fn superjob(&self) -> SuperJobSettings {
        let mut superjob = self.superjob.clone();
        // 環境變數沒有被替換時視為未提供
        if superjob
            .secret_key
            .as_deref()
            .is_some_and(|key| key.starts_with("${"))
        {
            superjob.secret_key = None;
        }
        superjob
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.survey.timeout_seconds)
    }

    fn output(&self) -> OutputSettings {
        match &self.load {
            Some(load) => OutputSettings {
                output_path: Some(load.output_path.clone()),
                output_formats: load
                    .output_formats
                    .clone()
                    .unwrap_or_else(|| vec!["csv".to_string(), "json".to_string()]),
                compress: load.compress.unwrap_or(false),
            },
            None => OutputSettings::default(),
        }
    }

    fn failure_policy(&self) -> FailurePolicy {
        self.error_handling
            .as_ref()
            .and_then(|eh| eh.on_source_failure)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
