mod row_normalizer;

pub use row_normalizer::{RowNormalizer, FIXED_CLASS, FIXED_INCOME_CLASSES};
