use clap::Parser;
use salary_etl::config::ConfigProvider;
use salary_etl::utils::error::ErrorSeverity;
use salary_etl::utils::{logger, validation::Validate};
use salary_etl::{
    CliConfig, EtlError, FileReport, HttpPageFetcher, LocalStorage, SurveyEngine, TerminalTable,
    TomlConfig,
};

fn build_engine<C: ConfigProvider + Validate>(
    config: &C,
) -> Result<SurveyEngine<HttpPageFetcher>, EtlError> {
    config.validate()?;

    let fetcher = HttpPageFetcher::from_config(config)?;
    let mut engine = SurveyEngine::from_config(fetcher, config).with_sink(Box::new(TerminalTable));

    let output = config.output();
    if let Some(path) = output.output_path {
        tracing::info!("📁 Reports will be written to: {}", path);
        let storage = LocalStorage::new(path);
        engine = engine.with_sink(Box::new(FileReport::new(
            storage,
            output.output_formats,
            output.compress,
        )));
    }

    Ok(engine)
}

fn exit_with(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Salary survey failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 可以提供 SUPERJOB_SECRET_KEY
    dotenvy::dotenv().ok();

    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting salary-etl");
    if cli.verbose {
        tracing::debug!("CLI languages: {:?}, sources: {:?}", cli.languages, cli.sources());
    }

    let engine = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path).and_then(|config| build_engine(&config))
        }
        None => build_engine(&cli),
    };

    let engine = match engine {
        Ok(engine) => engine,
        Err(e) => exit_with(&e),
    };

    match engine.run().await {
        Ok(report) => {
            let failed: Vec<_> = report.tables.iter().filter(|t| t.is_failed()).collect();
            if failed.is_empty() {
                tracing::info!("✅ Salary survey completed successfully");
            } else {
                for table in failed {
                    tracing::warn!(
                        "⚠️ {} report is incomplete: {}",
                        table.title,
                        table.failure.as_deref().unwrap_or_default()
                    );
                }
                std::process::exit(2);
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
