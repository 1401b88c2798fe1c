use crate::domain::model::{Program, Rate, RateTag, SortConfig};

/// Indices of the "lowest" rates within one program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestIndices {
    pub rate: usize,
    pub points: usize,
    /// First rate whose total closing costs are exactly zero, if any.
    pub zero_closing: Option<usize>,
}

impl BestIndices {
    /// Left fold over a program's rates. Index 0 seeds every running best;
    /// a later rate replaces it only when strictly lower, so ties keep the
    /// first occurrence.
    pub fn scan(rates: &[Rate]) -> Option<Self> {
        if rates.is_empty() {
            return None;
        }

        let best = rates
            .iter()
            .enumerate()
            .fold(BestIndices::default(), |best, (index, rate)| {
                best.observe(rates, index, rate)
            });

        Some(best)
    }

    fn observe(self, rates: &[Rate], index: usize, rate: &Rate) -> Self {
        let mut next = self;

        if next.zero_closing.is_none() && rate.total_closing_costs == 0 {
            next.zero_closing = Some(index);
        }

        if index > 0 {
            if strictly_lower(rate.rate, rates[self.rate].rate) {
                next.rate = index;
            }

            let points = rate.points.map(f64::abs);
            let best_points = rates[self.points].points.map(f64::abs);
            if strictly_lower(points, best_points) {
                next.points = index;
            }
        }

        next
    }

    /// Closing-cost "lowest" only recognises an exact zero total and
    /// otherwise falls back to the first rate.
    pub fn closing(&self) -> usize {
        self.zero_closing.unwrap_or(0)
    }
}

fn strictly_lower(candidate: Option<f64>, best: Option<f64>) -> bool {
    matches!((candidate, best), (Some(c), Some(b)) if c < b)
}

/// Tag the lowest rate, closing and points quotes of a program. A program
/// without rates is left untouched.
pub fn apply_tags(rates: &mut [Rate]) -> Option<BestIndices> {
    let best = BestIndices::scan(rates)?;

    rates[best.rate].tags.push(RateTag::LowestRate);
    rates[best.closing()].tags.push(RateTag::LowestClosing);
    rates[best.points].tags.push(RateTag::LowestPoints);

    Some(best)
}

/// Stable sort by composite rank; unranked programs go last in input order.
pub fn sort_programs(programs: &mut [Program], sort_config: &SortConfig) {
    programs.sort_by_key(|program| sort_config.key_for(&program.name, &program.product_type));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LenderCosts, Prepaids, RawRate, SortKey, ThirdPartyCosts};

    fn rate(rate: Option<f64>, points: Option<f64>, closing: i64) -> Rate {
        Rate {
            rate,
            apr: None,
            points,
            monthly_mortgage: 0,
            lender_costs: LenderCosts::default(),
            third_party_costs: ThirdPartyCosts::default(),
            prepaids: Prepaids::default(),
            total_closing_costs: closing,
            total_prepaids: 0,
            tags: Vec::new(),
            source_quote: RawRate::default(),
        }
    }

    fn program(name: &str, product_type: &str) -> Program {
        Program {
            name: name.to_string(),
            product_type: product_type.to_string(),
            display_name: format!("{}{}", name, product_type),
            rates: Vec::new(),
        }
    }

    #[test]
    fn test_scan_empty_program() {
        assert_eq!(BestIndices::scan(&[]), None);
    }

    #[test]
    fn test_scan_first_minimum_wins_ties() {
        let rates = vec![
            rate(Some(4.5), Some(1.0), 900),
            rate(Some(4.25), Some(-0.5), 800),
            rate(Some(4.25), Some(0.5), 700),
        ];
        let best = BestIndices::scan(&rates).unwrap();
        assert_eq!(best.rate, 1);
        assert_eq!(best.points, 1);
        assert_eq!(best.closing(), 0);
    }

    #[test]
    fn test_scan_closing_matches_first_exact_zero_only() {
        let rates = vec![
            rate(Some(4.0), Some(0.0), 500),
            rate(Some(4.0), Some(0.0), 0),
            rate(Some(4.0), Some(0.0), 0),
        ];
        assert_eq!(BestIndices::scan(&rates).unwrap().closing(), 1);

        let rates = vec![rate(Some(4.0), None, 500), rate(Some(4.0), None, 1)];
        assert_eq!(BestIndices::scan(&rates).unwrap().closing(), 0);
    }

    #[test]
    fn test_scan_missing_values_never_win() {
        let rates = vec![
            rate(None, Some(2.0), 10),
            rate(Some(3.0), None, 10),
            rate(Some(2.0), Some(1.0), 10),
        ];
        let best = BestIndices::scan(&rates).unwrap();
        // a missing seed value blocks every later comparison
        assert_eq!(best.rate, 0);
        assert_eq!(best.points, 2);
    }

    #[test]
    fn test_apply_tags_allows_multiple_tags_on_one_rate() {
        let mut rates = vec![rate(Some(4.0), Some(0.0), 0), rate(Some(4.5), Some(1.0), 10)];
        apply_tags(&mut rates);
        assert_eq!(
            rates[0].tags,
            vec![RateTag::LowestRate, RateTag::LowestClosing, RateTag::LowestPoints]
        );
        assert!(rates[1].tags.is_empty());
    }

    #[test]
    fn test_apply_tags_skips_empty_program() {
        let mut rates: Vec<Rate> = Vec::new();
        assert_eq!(apply_tags(&mut rates), None);
    }

    #[test]
    fn test_sort_programs_is_stable_and_unsortable_last() {
        let config = SortConfig::default();
        let mut programs = vec![
            program("30 year Fixed", "JUMBO"),
            program("15 year Fixed", "CONFORMING"),
            program("5 year ARM", "CONFORMING"),
            program("Mystery", "FHA"),
            program("30 year Fixed", "CONFORMING"),
        ];
        sort_programs(&mut programs, &config);

        let order: Vec<_> = programs
            .iter()
            .map(|p| p.display_name.as_str())
            .collect();
        assert_eq!(
            order,
            vec![
                "30 year FixedCONFORMING",
                "15 year FixedCONFORMING",
                "5 year ARMCONFORMING",
                "30 year FixedJUMBO",
                "MysteryFHA",
            ]
        );
        assert_eq!(config.key_for("Mystery", "FHA"), SortKey::Unsortable);
    }

    #[test]
    fn test_sort_programs_equal_keys_keep_input_order() {
        let mut config = SortConfig::default();
        config.name_order.insert("Alt 30".to_string(), 10);
        let mut programs = vec![
            program("Alt 30", "CONFORMING"),
            program("30 year Fixed", "CONFORMING"),
        ];
        sort_programs(&mut programs, &config);
        assert_eq!(programs[0].name, "Alt 30");
        assert_eq!(programs[1].name, "30 year Fixed");
    }
}
