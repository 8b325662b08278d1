use clap::Parser;
use roster_etl::domain::ports::ConfigProvider;
use roster_etl::utils::{logger, validation::Validate};
use roster_etl::{CliConfig, IngestEngine, LocalStorage, RosterPipeline, TomlConfig, VisionExtractor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting roster-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        report_failure(&e);
        std::process::exit(1);
    }

    let result = if let Some(path) = cli.config.clone() {
        match TomlConfig::from_file(&path) {
            Ok(config) => match config.validate() {
                Ok(()) => run(config).await,
                Err(e) => {
                    report_failure(&e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                report_failure(&e);
                std::process::exit(1);
            }
        }
    } else {
        run(cli).await
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Roster ingestion completed");
            println!("✅ Roster staged for review");
            println!("📁 Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    }
}

async fn run<C: ConfigProvider>(config: C) -> roster_etl::Result<String> {
    let extractor = VisionExtractor::new(
        config.vision_endpoint().map(str::to_string),
        config.vision_api_key().map(str::to_string),
        config.request_timeout_secs(),
    )?;
    let storage = LocalStorage::new(".".to_string());
    let pipeline = RosterPipeline::new(storage, config, extractor);

    IngestEngine::new(pipeline).run().await
}

fn report_failure(e: &roster_etl::IngestError) {
    tracing::error!("Roster ingestion failed: {}", e);
    eprintln!("❌ {}", e);
    if let Some(hint) = e.hint() {
        eprintln!("💡 {}", hint);
    }
}
