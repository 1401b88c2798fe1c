use crate::core::{Pipeline, QuoteSet};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub quotes: QuoteSet,
    pub written: Vec<String>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting rate quote normalization...");

        tracing::info!("Extracting pricing response...");
        let raw_programs = self.pipeline.extract()?;
        tracing::info!("Extracted {} programs", raw_programs.len());

        tracing::info!("Transforming quotes...");
        let quotes = self.pipeline.transform(raw_programs)?;
        tracing::info!(
            "Normalized {} rates across {} programs",
            quotes.rate_count(),
            quotes.programs.len()
        );

        tracing::info!("Writing reports...");
        let written = self.pipeline.load(&quotes)?;
        for path in &written {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(RunSummary { quotes, written })
    }
}
