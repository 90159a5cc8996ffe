use crate::classifier::Classification;
use crate::models::{NormalizedRow, RawHolding};

/// Class that fixed income grouping folds `FIXED_INCOME_CLASSES` into.
pub const FIXED_CLASS: &str = "Fixed";
pub const FIXED_INCOME_CLASSES: [&str; 2] = ["CD", "Treasury"];

/// Merges parsed holdings with their classification into report rows.
///
/// This is a pure transform: rows come out in the order they went in and running it
/// again over the same input yields the same rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowNormalizer {
    fixed_income_grouping: bool
}

impl RowNormalizer {
    pub fn new(fixed_income_grouping: bool) -> Self {
        Self { fixed_income_grouping }
    }

    pub fn normalize(&self, holding: &RawHolding, classification: &Classification) -> NormalizedRow {
        NormalizedRow {
            account: holding.account.clone(),
            asset_name: classification.asset_name.clone(),
            asset_class: self.group_class(&classification.asset_class).to_string(),
            quantity: holding.quantity,
            market_value: holding.market_value
        }
    }

    pub fn normalize_all<'a, I>(&self, classified: I) -> Vec<NormalizedRow>
    where
        I: IntoIterator<Item = (&'a RawHolding, &'a Classification)>
    {
        classified
            .into_iter()
            .map(|(holding, classification)| self.normalize(holding, classification))
            .collect()
    }

    fn group_class<'a>(&self, asset_class: &'a str) -> &'a str {
        let is_fixed_income = FIXED_INCOME_CLASSES
            .iter()
            .any(|class| asset_class.eq_ignore_ascii_case(class));

        if self.fixed_income_grouping && is_fixed_income {
            FIXED_CLASS
        } else {
            asset_class
        }
    }
}
