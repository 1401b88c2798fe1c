//! Rate-quote normalization and ranking.
//!
//! Turns the pricing endpoint's list of programs into cleaned, tagged and
//! ordered [`QuoteSet`]s. The transform itself is pure and total: malformed
//! fee fields fall back to their defaults instead of failing the run.

use crate::core::ranking::{apply_tags, sort_programs};
use crate::domain::model::{
    sum_saturating, LenderCosts, Prepaids, Program, QuoteSet, Rate, RawProgram, RawRate,
    SortConfig, SortKey, ThirdPartyCosts,
};
use crate::domain::ports::NumericParser;
use crate::utils::error::{QuoteError, Result};
use crate::utils::numeric::{numeric_or_default, round_to, AccountingParser};
use serde::Deserialize;
use serde_json::Value;

/// Wire names of the quote fields read by the transformer.
pub mod fields {
    pub const TEASER_RATE: &str = "teaserRate";
    pub const APR: &str = "APR";
    pub const POINT: &str = "point";
    pub const PAYMENT: &str = "payment";

    pub const LENDER_FEE: &str = "lenderFee813";
    pub const CREDIT_OR_CHARGE: &str = "creditOrCharge802";

    pub const APPRAISAL_FEE: &str = "appraisalFee804";
    pub const OWNERS_TITLE_INSURANCE: &str = "ownersTitleInsurance1103";
    pub const LENDERS_TITLE_INSURANCE: &str = "lendersTitleInsurance1104";
    pub const CLOSING_ESCROW_FEE: &str = "closingEscrowFee1102";
    pub const CREDIT_REPORT: &str = "creditReport805";
    pub const FLOOD_CERTIFICATION: &str = "floodCertification807";
    pub const WIRE_FEE: &str = "wireFee812";
    pub const NOTARY_FEE: &str = "notaryfee1110";
    pub const RECORDING_FEES: &str = "recordingFees1202";

    pub const INTEREST: &str = "interest901";
    pub const HAZARD_INSURANCE: &str = "hazIns903";
    pub const TAX_RESERVE: &str = "taxResrv1004";
    pub const HAZARD_INSURANCE_RESERVE: &str = "hazInsReserve1002";
}

/// Recording fee assumed when the quote does not carry one.
pub const DEFAULT_RECORDING_FEE: f64 = 87.0;

const OTHER_THIRD_PARTY_FEES: [&str; 4] = [
    fields::CREDIT_REPORT,
    fields::FLOOD_CERTIFICATION,
    fields::WIRE_FEE,
    fields::NOTARY_FEE,
];

pub struct RateQuoteTransformer<P: NumericParser = AccountingParser> {
    sort_config: SortConfig,
    parser: P,
}

impl RateQuoteTransformer<AccountingParser> {
    pub fn new(sort_config: SortConfig) -> Self {
        Self::with_parser(sort_config, AccountingParser)
    }
}

impl<P: NumericParser> RateQuoteTransformer<P> {
    pub fn with_parser(sort_config: SortConfig, parser: P) -> Self {
        Self {
            sort_config,
            parser,
        }
    }

    pub fn sort_config(&self) -> &SortConfig {
        &self.sort_config
    }

    pub fn transform(&self, raw_programs: &[RawProgram]) -> QuoteSet {
        let mut programs: Vec<Program> = raw_programs
            .iter()
            .map(|raw| self.build_program(raw))
            .collect();

        for program in &programs {
            if self.sort_config.key_for(&program.name, &program.product_type)
                == SortKey::Unsortable
            {
                tracing::warn!(
                    "No sort rank for program '{}' ({}), placing it last",
                    program.name,
                    program.product_type
                );
            }
        }

        sort_programs(&mut programs, &self.sort_config);

        QuoteSet { programs }
    }

    /// Transform an already-parsed pricing payload. A payload that is not an
    /// array of program objects is rejected here, before the transform runs.
    pub fn transform_value(&self, payload: &Value) -> Result<QuoteSet> {
        let raw_programs =
            Vec::<RawProgram>::deserialize(payload).map_err(|e| QuoteError::PayloadError {
                message: e.to_string(),
            })?;

        Ok(self.transform(&raw_programs))
    }

    fn build_program(&self, raw: &RawProgram) -> Program {
        let mut rates: Vec<Rate> = raw.rate_vo.iter().map(|r| self.build_rate(r)).collect();

        match apply_tags(&mut rates) {
            Some(best) => tracing::debug!(
                "Program '{}' {}: {} rates, lowest rate #{}, closing #{}, points #{}",
                raw.display_name,
                raw.product_type,
                rates.len(),
                best.rate,
                best.closing(),
                best.points
            ),
            None => tracing::debug!(
                "Program '{}' {} has no rates",
                raw.display_name,
                raw.product_type
            ),
        }

        Program {
            name: raw.display_name.clone(),
            product_type: raw.product_type.clone(),
            display_name: format!("{}{}", raw.display_name, raw.product_type),
            rates,
        }
    }

    fn build_rate(&self, raw: &RawRate) -> Rate {
        let lender_costs = LenderCosts {
            lender_fee: self.fee(raw, fields::LENDER_FEE),
            loanee_cost: self.fee(raw, fields::CREDIT_OR_CHARGE),
        };

        let third_party_costs = ThirdPartyCosts {
            appraisal_fee: self.fee(raw, fields::APPRAISAL_FEE),
            owners_title_ins: self.fee(raw, fields::OWNERS_TITLE_INSURANCE),
            lenders_title_ins: self.fee(raw, fields::LENDERS_TITLE_INSURANCE),
            closing_and_escrow_fees: self.fee(raw, fields::CLOSING_ESCROW_FEE),
            other_fees: self.other_fees(raw),
        };

        let prepaids = Prepaids {
            interest: self.fee(raw, fields::INTEREST),
            homeowners_ins: self.fee(raw, fields::HAZARD_INSURANCE),
            tax_reserve: self.fee(raw, fields::TAX_RESERVE),
            homeowners_ins_reserve: self.fee(raw, fields::HAZARD_INSURANCE_RESERVE),
        };

        let total_closing_costs =
            sum_saturating(&[lender_costs.total(), third_party_costs.total()]).max(0);
        let total_prepaids = prepaids.total();

        Rate {
            rate: self.decimal(raw, fields::TEASER_RATE),
            apr: self.decimal(raw, fields::APR),
            points: self.decimal(raw, fields::POINT),
            monthly_mortgage: self.fee(raw, fields::PAYMENT),
            lender_costs,
            third_party_costs,
            prepaids,
            total_closing_costs,
            total_prepaids,
            tags: Vec::new(),
            source_quote: raw.clone(),
        }
    }

    fn fee(&self, raw: &RawRate, field: &str) -> i64 {
        numeric_or_default(&self.parser, raw, field, 0.0)
    }

    fn other_fees(&self, raw: &RawRate) -> i64 {
        let mut fees: Vec<i64> = OTHER_THIRD_PARTY_FEES
            .iter()
            .map(|field| self.fee(raw, field))
            .collect();
        fees.push(numeric_or_default(
            &self.parser,
            raw,
            fields::RECORDING_FEES,
            DEFAULT_RECORDING_FEE,
        ));

        sum_saturating(&fees)
    }

    fn decimal(&self, raw: &RawRate, field: &str) -> Option<f64> {
        raw.field(field)
            .and_then(|v| self.parser.parse(v))
            .map(|v| round_to(v, 3))
    }
}

/// Transform with the default currency parser.
pub fn transform(raw_programs: &[RawProgram], sort_config: &SortConfig) -> QuoteSet {
    RateQuoteTransformer::new(sort_config.clone()).transform(raw_programs)
}
