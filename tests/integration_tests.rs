use anyhow::Result;
use rate_quote_etl::utils::validation::Validate;
use rate_quote_etl::{
    EtlEngine, LocalStorage, QuoteError, QuotePipeline, QuoteSet, RateCache, RateTag, RateView,
    TomlConfig,
};
use tempfile::TempDir;

const RESPONSE: &str = r#"[
  {"displayName": "5 year ARM", "productType": "CONFORMING", "rateVO": [
    {"teaserRate": "3.750", "APR": "3.981", "point": "0.250", "payment": "$1,852.46",
     "lenderFee813": "$1,195.00", "appraisalFee804": "$495.00", "recordingFees1202": "$105.00",
     "interest901": "$412.50", "hazIns903": "$1,100.00"}
  ]},
  {"displayName": "30 year Fixed", "productType": "CONFORMING", "rateVO": [
    {"teaserRate": "4.500", "APR": "4.611", "point": "0.000", "payment": "$2,026.74",
     "lenderFee813": "$1,195.00", "creditOrCharge802": "$0.00", "appraisalFee804": "$495.00",
     "ownersTitleInsurance1103": "$1,010.00", "closingEscrowFee1102": "$725.00"},
    {"teaserRate": "4.375", "APR": "4.534", "point": "0.750", "payment": "$1,997.33",
     "lenderFee813": "$1,195.00", "creditOrCharge802": "$3,000.00"},
    {"teaserRate": "4.625", "APR": "4.640", "point": "-1.125", "payment": "$2,056.82",
     "lenderFee813": "$0.00", "creditOrCharge802": "-$4,500.00", "appraisalFee804": "$495.00"}
  ]},
  {"displayName": "30 year Fixed", "productType": "FHA", "rateVO": null}
]"#;

fn write_config(dir: &TempDir, formats: &str) -> Result<String> {
    let base = dir.path().to_str().unwrap().replace('\\', "/");
    let response_path = format!("{}/response.json", base);
    std::fs::write(&response_path, RESPONSE)?;

    let config_content = format!(
        r#"
[pipeline]
name = "integration"
description = "End to end normalization"
version = "1.0.0"

[source]
path = "{}"

[sort.product_order]
CONFORMING = 100
FHA = 300

[sort.name_order]
"30 year Fixed" = 10
"5 year ARM" = 60

[load]
output_path = "{}/reports"
output_formats = [{}]
"#,
        response_path, base, formats
    );

    let config_path = format!("{}/pipeline.toml", base);
    std::fs::write(&config_path, config_content)?;
    Ok(config_path)
}

#[test]
fn test_end_to_end_from_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_config(&temp_dir, r#""json", "csv""#)?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;

    let pipeline = QuotePipeline::new(LocalStorage::default(), config);
    let summary = EtlEngine::new(pipeline).run()?;

    assert_eq!(summary.written.len(), 2);
    for path in &summary.written {
        assert!(std::path::Path::new(path).exists(), "{} missing", path);
    }

    let json_path = temp_dir.path().join("reports").join("rates.json");
    let reloaded: QuoteSet = serde_json::from_slice(&std::fs::read(json_path)?)?;
    assert_eq!(reloaded, summary.quotes);

    let order: Vec<&str> = reloaded
        .programs
        .iter()
        .map(|p| p.display_name.as_str())
        .collect();
    assert_eq!(
        order,
        vec![
            "30 year FixedCONFORMING",
            "5 year ARMCONFORMING",
            "30 year FixedFHA"
        ]
    );

    let thirty = &reloaded.programs[0];
    assert_eq!(thirty.rates[0].total_closing_costs, 1195 + 495 + 1010 + 725 + 87);
    assert_eq!(thirty.rates[2].total_closing_costs, 0);
    assert!(thirty.rates[1].has_tag(RateTag::LowestRate));
    assert!(thirty.rates[2].has_tag(RateTag::LowestClosing));
    assert!(thirty.rates[0].has_tag(RateTag::LowestPoints));

    let arm = &reloaded.programs[1];
    assert_eq!(arm.rates[0].total_prepaids, 413 + 1100);
    assert_eq!(
        arm.rates[0].tags,
        vec![
            RateTag::LowestRate,
            RateTag::LowestClosing,
            RateTag::LowestPoints
        ]
    );

    let csv_path = temp_dir.path().join("reports").join("rates.csv");
    let csv_data = std::fs::read_to_string(csv_path)?;
    assert_eq!(csv_data.lines().count(), 1 + 4);

    Ok(())
}

#[test]
fn test_selection_and_views_on_pipeline_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_config(&temp_dir, r#""json""#)?;
    let config = TomlConfig::from_file(&config_path)?;

    let summary = EtlEngine::new(QuotePipeline::new(LocalStorage::default(), config)).run()?;
    let quotes = summary.quotes;

    assert_eq!(quotes.visible(RateView::BestRate), vec![(0, 1), (1, 0)]);
    assert_eq!(quotes.visible(RateView::BestClosingCosts), vec![(0, 2), (1, 0)]);
    assert_eq!(quotes.visible(RateView::All).len(), 4);

    let selection = quotes.select(0, 2)?;
    let payload: serde_json::Value = serde_json::from_str(&selection.registration_payload()?)?;
    assert_eq!(payload["creditOrCharge802"], "-$4,500.00");
    assert_eq!(payload["teaserRate"], "4.625");

    assert!(matches!(
        quotes.select(2, 0),
        Err(QuoteError::SelectionOutOfRange { .. })
    ));

    Ok(())
}

#[test]
fn test_cache_reuses_quotes_for_equal_requests() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_config(&temp_dir, r#""json""#)?;

    let mut cache: RateCache<String> = RateCache::new();
    let mut runs = 0;

    for _ in 0..3 {
        cache.get_or_insert_with(&config_path, |path| {
            runs += 1;
            let config = TomlConfig::from_file(path)?;
            let summary =
                EtlEngine::new(QuotePipeline::new(LocalStorage::default(), config)).run()?;
            Ok(summary.quotes)
        })?;
    }

    assert_eq!(runs, 1);
    assert_eq!(cache.get(&config_path).map(|q| q.programs.len()), Some(3));
    Ok(())
}

#[test]
fn test_missing_input_reports_io_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = write_config(&temp_dir, r#""json""#)?;
    std::fs::remove_file(temp_dir.path().join("response.json"))?;

    let config = TomlConfig::from_file(&config_path)?;
    let result = EtlEngine::new(QuotePipeline::new(LocalStorage::default(), config)).run();

    assert!(matches!(result, Err(QuoteError::IoError(_))));
    Ok(())
}
