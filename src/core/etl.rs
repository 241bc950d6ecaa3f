use crate::config::{ConfigProvider, FailurePolicy};
use crate::core::{aggregator, normalizer, paginator};
use crate::domain::model::{LanguageStats, NormalizedSalary, Source, StatsTable, SurveyReport};
use crate::domain::ports::{PageFetcher, ReportSink};
use crate::utils::error::Result;

/// 依語言、再依來源逐一收集職缺並彙總成每個來源一張統計表
pub struct SurveyEngine<F: PageFetcher> {
    fetcher: F,
    languages: Vec<String>,
    sources: Vec<Source>,
    sinks: Vec<Box<dyn ReportSink>>,
    failure_policy: FailurePolicy,
}

impl<F: PageFetcher> SurveyEngine<F> {
    pub fn new(fetcher: F, languages: Vec<String>) -> Self {
        Self {
            fetcher,
            languages,
            sources: Source::ALL.to_vec(),
            sinks: Vec::new(),
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(fetcher: F, config: &C) -> Self {
        Self::new(fetcher, config.languages().to_vec())
            .with_sources(config.sources())
            .with_failure_policy(config.failure_policy())
    }

    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn ReportSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// 單一 (語言, 來源) 的完整流程：分頁取得、估算薪資、彙總
    pub async fn salary_statistics(&self, source: Source, language: &str) -> Result<LanguageStats> {
        let listings = paginator::fetch_all(&self.fetcher, source, language).await?;
        let salaries: Vec<NormalizedSalary> = listings
            .iter()
            .map(|listing| normalizer::normalize(source, listing))
            .collect();

        Ok(aggregator::aggregate(listings.len(), &salaries))
    }

    pub async fn run(&self) -> Result<SurveyReport> {
        tracing::info!(
            "🚀 Starting salary survey: {} languages, sources {:?}",
            self.languages.len(),
            self.sources
        );

        let mut tables: Vec<StatsTable> = self.sources.iter().copied().map(StatsTable::new).collect();

        for language in &self.languages {
            for table in tables.iter_mut() {
                if table.is_failed() {
                    continue;
                }

                match self.salary_statistics(table.source, language).await {
                    Ok(stats) => {
                        tracing::info!(
                            "✅ {} {}: found {}, processed {}, average {}",
                            table.source,
                            language,
                            stats.vacancies_found,
                            stats.vacancies_processed,
                            stats.average_salary
                        );
                        table.push(language, stats);
                    }
                    Err(e)
                        if e.is_source_failure()
                            && self.failure_policy == FailurePolicy::SkipSource =>
                    {
                        tracing::warn!(
                            "⚠️ {} skipped for the remaining languages: {}",
                            table.source,
                            e
                        );
                        table.failure = Some(e.to_string());
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        for table in &tables {
            for sink in &self.sinks {
                sink.emit(table).await?;
            }
        }

        Ok(SurveyReport {
            tables,
            generated_at: chrono::Utc::now(),
        })
    }
}
