pub mod etl;
pub mod pipeline;
pub mod ranking;
pub mod rate_cache;
pub mod selection;
pub mod transformer;

pub use crate::domain::model::{Program, QuoteSet, Rate, RawProgram, RawRate, SortConfig};
pub use crate::domain::ports::{ConfigProvider, NumericParser, Pipeline, Storage};
pub use crate::utils::error::Result;
