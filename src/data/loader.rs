use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use super::encoder::{parse_id, parse_label, FeatureEncoder};
use super::model::{FeatureVector, Label, Sample};
use super::schema::{ColumnLayout, LabelLayout};
use super::source::DataSource;
use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How the CSV sources are read and which columns hold what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip the first row of every source.
    pub has_headers: bool,
    pub delimiter: u8,
    pub training_layout: ColumnLayout,
    pub testing_layout: ColumnLayout,
    pub label_layout: LabelLayout,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
            training_layout: ColumnLayout::TRAINING,
            testing_layout: ColumnLayout::TESTING,
            label_layout: LabelLayout::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read every row of a training source; the label is in the same row.
pub fn load_training(source: DataSource<'_>, options: &LoadOptions) -> Result<Vec<Sample>> {
    let encoder = FeatureEncoder::new(options.training_layout);
    if options.training_layout.label.is_none() {
        return Err(DataError::InvalidArgument(
            "training layout must name a label column".to_string(),
        ));
    }

    let mut samples = Vec::new();
    for_each_record(source, options, |record| {
        samples.push(Sample {
            id: encoder.id(record)?,
            features: encoder.encode(record)?,
            label: encoder.label(record)?,
        });
        Ok(())
    })?;
    Ok(samples)
}

/// Read a feature source and a label source and join them on the
/// passenger id.
///
/// Fails with `MisalignedSources` when the row counts differ, an id repeats
/// in the label source, or a feature row has no matching label.
pub fn load_testing(
    features: DataSource<'_>,
    labels: DataSource<'_>,
    options: &LoadOptions,
) -> Result<Vec<Sample>> {
    let encoder = FeatureEncoder::new(options.testing_layout);

    let mut encoded: Vec<(u64, FeatureVector)> = Vec::new();
    for_each_record(features, options, |record| {
        encoded.push((encoder.id(record)?, encoder.encode(record)?));
        Ok(())
    })?;

    let label_layout = options.label_layout;
    let mut label_rows: Vec<(u64, Label)> = Vec::new();
    for_each_record(labels, options, |record| {
        label_rows.push((
            parse_id(record, label_layout.id)?,
            parse_label(record, label_layout.label)?,
        ));
        Ok(())
    })?;

    if encoded.len() != label_rows.len() {
        return Err(DataError::MisalignedSources(format!(
            "{} feature rows but {} label rows",
            encoded.len(),
            label_rows.len()
        )));
    }

    let mut by_id: HashMap<u64, Label> = HashMap::with_capacity(label_rows.len());
    for (id, label) in label_rows {
        if by_id.insert(id, label).is_some() {
            return Err(DataError::MisalignedSources(format!(
                "PassengerId {id} appears more than once in the label source"
            )));
        }
    }

    encoded
        .into_iter()
        .map(|(id, features)| {
            let label = by_id.get(&id).copied().ok_or_else(|| {
                DataError::MisalignedSources(format!("no label for PassengerId {id}"))
            })?;
            Ok(Sample { id, features, label })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV plumbing
// ---------------------------------------------------------------------------

/// Open `source` and hand each data row to `visit`. Field errors are
/// tagged with the 1-based data row number.
///
/// The reader owns the handle, so it is closed on return whether or not
/// a row failed.
fn for_each_record<F>(source: DataSource<'_>, options: &LoadOptions, mut visit: F) -> Result<()>
where
    F: FnMut(&StringRecord) -> Result<()>,
{
    let handle: Box<dyn Read + '_> = source.open()?;
    let mut reader = ReaderBuilder::new()
        .has_headers(options.has_headers)
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(handle);

    let mut record = StringRecord::new();
    let mut row_no = 0;
    while reader.read_record(&mut record)? {
        row_no += 1;
        visit(&record).map_err(|e| e.at_row(row_no))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TRAIN: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S
2,1,1,\"Cumings, Mrs. John Bradley (Florence Briggs Thayer)\",female,38,1,0,PC 17599,71.2833,C85,C
3,1,3,\"Heikkinen, Miss. Laina\",female,26,0,0,STON/O2. 3101282,7.925,,S
";

    const TEST: &str = "\
PassengerId,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
892,3,\"Kelly, Mr. James\",male,34.5,0,0,330911,7.8292,,Q
893,3,\"Wilkes, Mrs. James (Ellen Needs)\",female,47,1,0,363272,7,,S
894,2,\"Myles, Mr. Thomas Francis\",male,62,0,0,240276,9.6875,,Q
";

    fn reader(text: &str) -> DataSource<'_> {
        DataSource::from_reader(Cursor::new(text))
    }

    #[test]
    fn test_load_training_rows() {
        let samples = load_training(reader(TRAIN), &LoadOptions::default()).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].id, 1);
        assert_eq!(samples[0].label, 0);
        assert_eq!(samples[0].features, FeatureVector([3, 0, 1, 1, 0, 0]));
        assert_eq!(samples[1].features, FeatureVector([1, 1, 1, 1, 0, 4]));
    }

    #[test]
    fn test_training_error_carries_row_number() {
        let text = TRAIN.replace("female,26", "female,");
        let err = load_training(reader(&text), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::InvalidField { field: "Age", row: Some(3), .. }));
    }

    #[test]
    fn test_headerless_training() {
        let text = TRAIN.lines().skip(1).collect::<Vec<_>>().join("\n");
        let options = LoadOptions {
            has_headers: false,
            ..LoadOptions::default()
        };
        assert_eq!(load_training(reader(&text), &options).unwrap().len(), 3);
    }

    #[test]
    fn test_join_by_id_ignores_label_order() {
        let labels = "PassengerId,Survived\n894,0\n892,0\n893,1\n";
        let samples = load_testing(reader(TEST), reader(labels), &LoadOptions::default()).unwrap();
        let got: Vec<(u64, Label)> = samples.iter().map(|s| (s.id, s.label)).collect();
        assert_eq!(got, vec![(892, 0), (893, 1), (894, 0)]);
        assert_eq!(samples[2].features, FeatureVector([2, 0, 2, 0, 0, 0]));
    }

    #[test]
    fn test_length_mismatch_is_misaligned() {
        let labels = "PassengerId,Survived\n892,0\n893,1\n";
        let err = load_testing(reader(TEST), reader(labels), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::MisalignedSources(_)));
    }

    #[test]
    fn test_unknown_id_is_misaligned() {
        let labels = "PassengerId,Survived\n892,0\n893,1\n999,1\n";
        let err = load_testing(reader(TEST), reader(labels), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::MisalignedSources(msg) if msg.contains("894")));
    }

    #[test]
    fn test_duplicate_label_id_is_misaligned() {
        let labels = "PassengerId,Survived\n892,0\n892,1\n893,1\n";
        let err = load_testing(reader(TEST), reader(labels), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::MisalignedSources(msg) if msg.contains("892")));
    }
}
