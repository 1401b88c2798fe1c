use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One loan program as returned by the pricing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProgram {
    #[serde(rename = "displayName", default, deserialize_with = "null_as_empty")]
    pub display_name: String,
    #[serde(rename = "productType", default, deserialize_with = "null_as_empty")]
    pub product_type: String,
    #[serde(rename = "rateVO", default, deserialize_with = "null_as_empty")]
    pub rate_vo: Vec<RawRate>,
}

/// A single upstream rate quote, kept exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRate(Value);

impl RawRate {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Look up a named fee field. Non-object quotes have no fields.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|obj| obj.get(name))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for RawRate {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Whole-dollar sum that cannot overflow on hostile upstream values.
pub fn sum_saturating(values: &[i64]) -> i64 {
    values.iter().fold(0i64, |acc, v| acc.saturating_add(*v))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RateTag {
    LowestRate,
    LowestClosing,
    LowestPoints,
}

impl RateTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateTag::LowestRate => "lowestRate",
            RateTag::LowestClosing => "lowestClosing",
            RateTag::LowestPoints => "lowestPoints",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LenderCosts {
    pub lender_fee: i64,
    pub loanee_cost: i64,
}

impl LenderCosts {
    pub fn total(&self) -> i64 {
        sum_saturating(&[self.lender_fee, self.loanee_cost])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartyCosts {
    pub appraisal_fee: i64,
    pub owners_title_ins: i64,
    pub lenders_title_ins: i64,
    pub closing_and_escrow_fees: i64,
    pub other_fees: i64,
}

impl ThirdPartyCosts {
    pub fn total(&self) -> i64 {
        sum_saturating(&[
            self.appraisal_fee,
            self.owners_title_ins,
            self.lenders_title_ins,
            self.closing_and_escrow_fees,
            self.other_fees,
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prepaids {
    pub interest: i64,
    pub homeowners_ins: i64,
    pub tax_reserve: i64,
    pub homeowners_ins_reserve: i64,
}

impl Prepaids {
    pub fn total(&self) -> i64 {
        sum_saturating(&[
            self.interest,
            self.homeowners_ins,
            self.tax_reserve,
            self.homeowners_ins_reserve,
        ])
    }
}

/// A cleaned rate quote, ready for display and selection.
///
/// `rate`, `apr` and `points` are `None` when the upstream value was missing
/// or not numeric; they serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub rate: Option<f64>,
    pub apr: Option<f64>,
    pub points: Option<f64>,
    pub monthly_mortgage: i64,
    pub lender_costs: LenderCosts,
    pub third_party_costs: ThirdPartyCosts,
    pub prepaids: Prepaids,
    pub total_closing_costs: i64,
    pub total_prepaids: i64,
    pub tags: Vec<RateTag>,
    pub source_quote: RawRate,
}

impl Rate {
    pub fn has_tag(&self, tag: RateTag) -> bool {
        self.tags.contains(&tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub name: String,
    pub product_type: String,
    pub display_name: String,
    pub rates: Vec<Rate>,
}

/// The transformer's output: programs in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSet {
    pub programs: Vec<Program>,
}

/// Caller-supplied ranking tables for program ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub product_order: BTreeMap<String, i64>,
    #[serde(default)]
    pub name_order: BTreeMap<String, i64>,
}

impl SortConfig {
    pub fn new(product_order: BTreeMap<String, i64>, name_order: BTreeMap<String, i64>) -> Self {
        Self {
            product_order,
            name_order,
        }
    }

    /// Composite ordering key for a program. Programs missing from either
    /// table go to the unsortable bucket.
    pub fn key_for(&self, name: &str, product_type: &str) -> SortKey {
        match (self.name_order.get(name), self.product_order.get(product_type)) {
            (Some(name_rank), Some(product_rank)) => {
                SortKey::Ranked(name_rank.saturating_add(*product_rank))
            }
            _ => SortKey::Unsortable,
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        let product_order = [
            ("CONFORMING", 100),
            ("NONCONFORMING", 200),
            ("FHA", 300),
            ("FHA-Streamline", 400),
        ];
        let name_order = [
            ("30 year Fixed", 10),
            ("15 year Fixed", 20),
            ("20 year Fixed", 30),
            ("10 year Fixed", 40),
            ("7 year ARM", 50),
            ("5 year ARM", 60),
        ];

        Self {
            product_order: product_order
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            name_order: name_order.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }
}

/// Ordering key; every `Ranked` key sorts before `Unsortable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Ranked(i64),
    Unsortable,
}
