use csv::StringRecord;

use super::model::{FeatureVector, Label};
use super::schema::ColumnLayout;
use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Bucket maps
// ---------------------------------------------------------------------------

/// Ordered `(exclusive upper bound, bucket)` rules; the first rule whose
/// bound exceeds the age wins.
pub const AGE_RULES: [(u32, u32); 2] = [
    (18, 0), // children
    (60, 1), // adults
];

/// Bucket for ages not caught by [`AGE_RULES`] (60 and over).
pub const SENIOR_BUCKET: u32 = 2;

/// Deck letter to rank. Letters not listed (including those past `G`)
/// rank the same as `G`.
pub const DECK_RANKS: [(char, u32); 7] = [
    ('G', 0),
    ('F', 1),
    ('E', 2),
    ('D', 3),
    ('C', 4),
    ('B', 5),
    ('A', 6),
];

/// Deck assumed for passengers with no recorded cabin.
pub const DEFAULT_DECK: char = 'G';

/// Sex categories; the index is the encoded value.
pub const SEX_CATEGORIES: [&str; 2] = ["male", "female"];

pub fn age_bucket(age: u32) -> u32 {
    AGE_RULES
        .iter()
        .find(|(bound, _)| age < *bound)
        .map(|&(_, bucket)| bucket)
        .unwrap_or(SENIOR_BUCKET)
}

/// Rank of the deck named by the first letter of `cabin`.
pub fn deck_rank(cabin: Option<&str>) -> u32 {
    let letter = cabin
        .and_then(|c| c.trim().chars().next())
        .unwrap_or(DEFAULT_DECK);
    DECK_RANKS
        .iter()
        .find(|(deck, _)| *deck == letter)
        .map(|&(_, rank)| rank)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Record access
// ---------------------------------------------------------------------------

/// Positional access to the raw string fields of one row.
pub trait Fields {
    fn field(&self, index: usize) -> Option<&str>;
}

impl Fields for StringRecord {
    fn field(&self, index: usize) -> Option<&str> {
        self.get(index)
    }
}

impl<S: AsRef<str>> Fields for [S] {
    fn field(&self, index: usize) -> Option<&str> {
        self.get(index).map(|s| s.as_ref())
    }
}

impl<S: AsRef<str>, const N: usize> Fields for [S; N] {
    fn field(&self, index: usize) -> Option<&str> {
        self.get(index).map(|s| s.as_ref())
    }
}

impl<S: AsRef<str>> Fields for Vec<S> {
    fn field(&self, index: usize) -> Option<&str> {
        self.get(index).map(|s| s.as_ref())
    }
}

fn require<'r, R: Fields + ?Sized>(record: &'r R, name: &'static str, column: usize) -> Result<&'r str> {
    record
        .field(column)
        .ok_or_else(|| DataError::invalid_field(name, column, "column outside the record"))
}

fn parse_count<R: Fields + ?Sized>(record: &R, name: &'static str, column: usize) -> Result<u32> {
    let raw = require(record, name, column)?.trim();
    raw.parse::<u32>().map_err(|e| {
        DataError::invalid_field(name, column, format!("'{raw}' is not a non-negative integer ({e})"))
    })
}

/// Whole years; fractional ages (infants) are truncated.
fn parse_age(raw: &str, column: usize) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DataError::invalid_field("Age", column, "age is missing"));
    }
    let years: f64 = raw
        .parse()
        .map_err(|_| DataError::invalid_field("Age", column, format!("'{raw}' is not a number")))?;
    if !years.is_finite() || years < 0.0 {
        return Err(DataError::invalid_field("Age", column, format!("'{raw}' is not a valid age")));
    }
    Ok(years.trunc() as u32)
}

pub(crate) fn parse_id<R: Fields + ?Sized>(record: &R, column: usize) -> Result<u64> {
    let raw = require(record, "PassengerId", column)?.trim();
    raw.parse::<u64>().map_err(|e| {
        DataError::invalid_field("PassengerId", column, format!("'{raw}' is not an identifier ({e})"))
    })
}

pub(crate) fn parse_label<R: Fields + ?Sized>(record: &R, column: usize) -> Result<Label> {
    let raw = require(record, "Survived", column)?.trim();
    let value: u32 = raw.parse().map_err(|e| {
        DataError::invalid_field("Survived", column, format!("'{raw}' is not an integer ({e})"))
    })?;
    match value {
        0 | 1 => Ok(value as Label),
        _ => Err(DataError::invalid_category("Survived", column, raw)),
    }
}

// ---------------------------------------------------------------------------
// FeatureEncoder
// ---------------------------------------------------------------------------

/// Turns raw rows of a known layout into [`FeatureVector`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder {
    layout: ColumnLayout,
}

impl FeatureEncoder {
    pub fn new(layout: ColumnLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Encode one row. Name, ticket, fare and embarkation are ignored.
    pub fn encode<R: Fields + ?Sized>(&self, record: &R) -> Result<FeatureVector> {
        let l = &self.layout;

        let class = parse_count(record, "Pclass", l.class)?;

        let sex_raw = require(record, "Sex", l.sex)?.trim();
        let sex = SEX_CATEGORIES
            .iter()
            .position(|&s| s == sex_raw)
            .ok_or_else(|| DataError::invalid_category("Sex", l.sex, sex_raw))? as u32;

        let age = age_bucket(parse_age(require(record, "Age", l.age)?, l.age)?);

        let siblings_spouses = parse_count(record, "SibSp", l.siblings_spouses)?;
        let parents_children = parse_count(record, "Parch", l.parents_children)?;

        let deck = deck_rank(Some(require(record, "Cabin", l.cabin)?));

        Ok(FeatureVector([class, sex, age, siblings_spouses, parents_children, deck]))
    }

    /// Read the in-row label. Fails with `InvalidArgument` for layouts
    /// that carry no label column.
    pub fn label<R: Fields + ?Sized>(&self, record: &R) -> Result<Label> {
        let column = self.layout.label.ok_or_else(|| {
            DataError::InvalidArgument("this layout has no label column".to_string())
        })?;
        parse_label(record, column)
    }

    pub fn id<R: Fields + ?Sized>(&self, record: &R) -> Result<u64> {
        parse_id(record, self.layout.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train_row(sex: &str, age: &str, cabin: &str) -> Vec<String> {
        ["1", "0", "3", "Braund, Mr. Owen Harris", sex, age, "1", "2", "A/5 21171", "7.25", cabin, "S"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_age_buckets_at_boundaries() {
        assert_eq!(age_bucket(0), 0);
        assert_eq!(age_bucket(17), 0);
        assert_eq!(age_bucket(18), 1);
        assert_eq!(age_bucket(59), 1);
        assert_eq!(age_bucket(60), 2);
        assert_eq!(age_bucket(80), 2);
    }

    #[test]
    fn test_deck_rank_lookup_and_defaults() {
        assert_eq!(deck_rank(Some("A23")), 6);
        assert_eq!(deck_rank(Some("C85")), 4);
        assert_eq!(deck_rank(Some("F12")), 1);
        assert_eq!(deck_rank(Some("T")), 0);
        assert_eq!(deck_rank(Some("z")), 0);
        assert_eq!(deck_rank(None), deck_rank(Some("G")));
        assert_eq!(deck_rank(Some("")), deck_rank(Some("G")));
    }

    #[test]
    fn test_encode_example_row() {
        let encoder = FeatureEncoder::default();
        let fv = encoder.encode(&train_row("male", "25", "F12")).unwrap();
        assert_eq!(fv, FeatureVector([3, 0, 1, 1, 2, 1]));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = FeatureEncoder::default();
        let row = train_row("female", "63", "B5");
        let first = encoder.encode(&row).unwrap();
        let second = encoder.encode(&row).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, FeatureVector([3, 1, 2, 1, 2, 5]));
    }

    #[test]
    fn test_fractional_age_is_truncated() {
        let encoder = FeatureEncoder::default();
        let fv = encoder.encode(&train_row("male", "0.42", "")).unwrap();
        assert_eq!(fv.age_bucket(), 0);
        assert_eq!(fv.deck_rank(), 0);
    }

    #[test]
    fn test_unknown_sex_is_invalid_category() {
        let encoder = FeatureEncoder::default();
        let err = encoder.encode(&train_row("unknown", "30", "")).unwrap_err();
        assert!(matches!(err, DataError::InvalidCategory { field: "Sex", .. }));
    }

    #[test]
    fn test_missing_age_is_invalid_field() {
        let encoder = FeatureEncoder::default();
        for age in ["", "  ", "abc", "-3", "NaN"] {
            let err = encoder.encode(&train_row("male", age, "")).unwrap_err();
            assert!(
                matches!(err, DataError::InvalidField { field: "Age", .. }),
                "age {age:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_negative_count_is_invalid_field() {
        let encoder = FeatureEncoder::default();
        let mut row = train_row("male", "30", "");
        row[6] = "-1".to_string();
        let err = encoder.encode(&row).unwrap_err();
        assert!(matches!(err, DataError::InvalidField { field: "SibSp", column: 6, .. }));
    }

    #[test]
    fn test_short_row_is_invalid_field() {
        let encoder = FeatureEncoder::default();
        let row = ["1", "0", "3", "Name", "male", "30", "0", "0"];
        let err = encoder.encode(&row).unwrap_err();
        assert!(matches!(err, DataError::InvalidField { field: "Cabin", column: 10, .. }));
    }

    #[test]
    fn test_testing_layout_reads_shifted_columns() {
        let encoder = FeatureEncoder::new(ColumnLayout::TESTING);
        let row = ["892", "3", "Kelly, Mr. James", "male", "34.5", "0", "0", "330911", "7.8292", "", "Q"];
        assert_eq!(encoder.encode(&row).unwrap(), FeatureVector([3, 0, 1, 0, 0, 0]));
        assert!(matches!(encoder.label(&row), Err(DataError::InvalidArgument(_))));
        assert_eq!(encoder.id(&row).unwrap(), 892);
    }

    #[test]
    fn test_label_domain() {
        let encoder = FeatureEncoder::default();
        let mut row = train_row("male", "30", "");
        assert_eq!(encoder.label(&row).unwrap(), 0);
        row[1] = "2".to_string();
        assert!(matches!(encoder.label(&row), Err(DataError::InvalidCategory { .. })));
        row[1] = "yes".to_string();
        assert!(matches!(encoder.label(&row), Err(DataError::InvalidField { .. })));
    }

    #[test]
    fn test_encodes_string_record() {
        let record = StringRecord::from(train_row("female", "18", "D33"));
        let fv = FeatureEncoder::default().encode(&record).unwrap();
        assert_eq!(fv, FeatureVector([3, 1, 1, 1, 2, 3]));
    }
}
