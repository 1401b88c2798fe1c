use crate::core::transformer::RateQuoteTransformer;
use crate::core::{ConfigProvider, Pipeline, QuoteSet, RawProgram, Storage};
use crate::utils::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const JSON_FILENAME: &str = "rates.json";
pub const CSV_FILENAME: &str = "rates.csv";

/// Reads a saved pricing response, normalizes it and writes the report
/// files.
pub struct QuotePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> QuotePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, filename: &str) -> String {
        Path::new(self.config.output_path())
            .join(filename)
            .to_string_lossy()
            .into_owned()
    }
}

#[derive(Debug, Serialize)]
struct RateRow<'a> {
    program_index: usize,
    rate_index: usize,
    name: &'a str,
    product_type: &'a str,
    rate: Option<f64>,
    apr: Option<f64>,
    points: Option<f64>,
    monthly_mortgage: i64,
    total_closing_costs: i64,
    total_prepaids: i64,
    tags: String,
}

fn render_csv(result: &QuoteSet) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for (program_index, program) in result.programs.iter().enumerate() {
        for (rate_index, rate) in program.rates.iter().enumerate() {
            writer.serialize(RateRow {
                program_index,
                rate_index,
                name: &program.name,
                product_type: &program.product_type,
                rate: rate.rate,
                apr: rate.apr,
                points: rate.points,
                monthly_mortgage: rate.monthly_mortgage,
                total_closing_costs: rate.total_closing_costs,
                total_prepaids: rate.total_prepaids,
                tags: rate
                    .tags
                    .iter()
                    .map(|tag| tag.as_str())
                    .collect::<Vec<_>>()
                    .join("|"),
            })?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| QuoteError::IoError(e.into_error()))
}

impl<S: Storage, C: ConfigProvider> Pipeline for QuotePipeline<S, C> {
    fn extract(&self) -> Result<Vec<RawProgram>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading pricing response from: {}", input_path);

        let bytes = self.storage.read_file(input_path)?;
        let payload: serde_json::Value = serde_json::from_slice(&bytes)?;

        Vec::<RawProgram>::deserialize(&payload).map_err(|e| QuoteError::PayloadError {
            message: e.to_string(),
        })
    }

    fn transform(&self, data: Vec<RawProgram>) -> Result<QuoteSet> {
        let transformer = RateQuoteTransformer::new(self.config.sort_config());
        Ok(transformer.transform(&data))
    }

    fn load(&self, result: &QuoteSet) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let (filename, data) = match format.as_str() {
                "json" => (JSON_FILENAME, serde_json::to_vec_pretty(result)?),
                "csv" => (CSV_FILENAME, render_csv(result)?),
                other => {
                    return Err(QuoteError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format. Valid formats: json, csv".to_string(),
                    })
                }
            };

            let path = self.output_file(filename);
            tracing::debug!("Writing {} ({} bytes)", path, data.len());
            self.storage.write_file(&path, &data)?;
            written.push(path);
        }

        Ok(written)
    }
}
