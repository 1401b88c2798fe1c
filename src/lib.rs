pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    etl::{EtlEngine, RunSummary},
    pipeline::QuotePipeline,
    rate_cache::RateCache,
    selection::{RateView, Selection},
    transformer::{transform, RateQuoteTransformer},
};
pub use crate::domain::model::{Program, QuoteSet, Rate, RateTag, RawProgram, RawRate, SortConfig};
pub use crate::utils::error::{QuoteError, Result};
