use clap::Parser;
use rate_quote_etl::core::ConfigProvider;
use rate_quote_etl::utils::error::{ErrorSeverity, QuoteError};
use rate_quote_etl::utils::{logger, validation::Validate};
use rate_quote_etl::{CliConfig, EtlEngine, LocalStorage, QuotePipeline, RateView, TomlConfig};

fn main() {
    let cli = CliConfig::parse();

    let loaded = cli
        .config
        .as_deref()
        .map(|path| TomlConfig::from_file(path))
        .transpose();

    let toml_config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if cli.json_logs {
        let level = toml_config
            .as_ref()
            .map(|c| c.log_level())
            .unwrap_or(if cli.verbose { "debug" } else { "info" });
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting rate-quote-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let view = match cli.view.parse::<RateView>() {
        Ok(view) => view,
        Err(e) => exit_with(&e),
    };

    let result = match toml_config {
        Some(config) => run(config, view),
        None => run(cli, view),
    };

    if let Err(e) = result {
        exit_with(&e);
    }
}

fn run<C: ConfigProvider + Validate>(config: C, view: RateView) -> Result<(), QuoteError> {
    config.validate()?;

    let pipeline = QuotePipeline::new(LocalStorage::default(), config);
    let summary = EtlEngine::new(pipeline).run()?;

    for (program_index, rate_index) in summary.quotes.visible(view) {
        let selection = summary.quotes.select(program_index, rate_index)?;
        let tags: Vec<&str> = selection.rate.tags.iter().map(|t| t.as_str()).collect();
        println!(
            "[{}:{}] {} {} rate={} apr={} points={} closing=${} prepaids=${} {}",
            program_index,
            rate_index,
            selection.program.name,
            selection.program.product_type,
            display_decimal(selection.rate.rate),
            display_decimal(selection.rate.apr),
            display_decimal(selection.rate.points),
            selection.rate.total_closing_costs,
            selection.rate.total_prepaids,
            tags.join(",")
        );
    }

    println!("✅ Normalized {} programs", summary.quotes.programs.len());
    for path in &summary.written {
        println!("📁 Output saved to: {}", path);
    }

    Ok(())
}

fn display_decimal(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn exit_with(e: &QuoteError) -> ! {
    tracing::error!(
        "❌ Rate quote run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
