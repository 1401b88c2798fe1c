use crate::domain::model::{Program, QuoteSet, Rate, RateTag};
use crate::utils::error::{QuoteError, Result};
use std::str::FromStr;

/// A rate chosen by position in a [`QuoteSet`].
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub program: &'a Program,
    pub rate: &'a Rate,
}

impl Selection<'_> {
    /// The untouched upstream quote, serialized for the registration
    /// request.
    pub fn registration_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rate.source_quote)?)
    }
}

/// Which rates a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateView {
    BestRate,
    BestClosingCosts,
    All,
}

impl FromStr for RateView {
    type Err = QuoteError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bestrate" => Ok(Self::BestRate),
            "bestclosingcosts" => Ok(Self::BestClosingCosts),
            "all" => Ok(Self::All),
            other => Err(QuoteError::InvalidConfigValueError {
                field: "view".to_string(),
                value: other.to_string(),
                reason: "expected one of: bestrate, bestclosingcosts, all".to_string(),
            }),
        }
    }
}

impl RateView {
    fn shows(&self, rate: &Rate) -> bool {
        match self {
            RateView::BestRate => rate.has_tag(RateTag::LowestRate),
            RateView::BestClosingCosts => rate.has_tag(RateTag::LowestClosing),
            RateView::All => true,
        }
    }
}

impl QuoteSet {
    pub fn select(&self, program_index: usize, rate_index: usize) -> Result<Selection<'_>> {
        let out_of_range = || QuoteError::SelectionOutOfRange {
            program_index,
            rate_index,
        };

        let program = self.programs.get(program_index).ok_or_else(out_of_range)?;
        let rate = program.rates.get(rate_index).ok_or_else(out_of_range)?;

        Ok(Selection { program, rate })
    }

    /// `(program_index, rate_index)` pairs visible under `view`, in display
    /// order.
    pub fn visible(&self, view: RateView) -> Vec<(usize, usize)> {
        self.programs
            .iter()
            .enumerate()
            .flat_map(|(p, program)| {
                program
                    .rates
                    .iter()
                    .enumerate()
                    .filter(move |(_, rate)| view.shows(rate))
                    .map(move |(r, _)| (p, r))
            })
            .collect()
    }

    pub fn rate_count(&self) -> usize {
        self.programs.iter().map(|p| p.rates.len()).sum()
    }
}
