use crate::domain::model::{QuoteSet, RawProgram, SortConfig};
use crate::utils::error::Result;
use serde_json::Value;

/// Reads a numeric value out of a loosely formatted wire value.
pub trait NumericParser {
    fn parse(&self, value: &Value) -> Option<f64>;
}

impl<F> NumericParser for F
where
    F: Fn(&Value) -> Option<f64>,
{
    fn parse(&self, value: &Value) -> Option<f64> {
        self(value)
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn sort_config(&self) -> SortConfig;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<RawProgram>>;
    fn transform(&self, data: Vec<RawProgram>) -> Result<QuoteSet>;
    fn load(&self, result: &QuoteSet) -> Result<Vec<String>>;
}
