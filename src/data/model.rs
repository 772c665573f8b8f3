use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of components in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 6;

/// Survival outcome: `0` died, `1` survived.
pub type Label = u8;

// ---------------------------------------------------------------------------
// FeatureVector – fixed-length numeric encoding of one passenger
// ---------------------------------------------------------------------------

/// `[class, sex, age bucket, siblings/spouses, parents/children, deck rank]`.
///
/// Age bucket is always in `0..=2` and deck rank in `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector(pub [u32; FEATURE_COUNT]);

impl FeatureVector {
    pub fn class(&self) -> u32 {
        self.0[0]
    }

    pub fn sex(&self) -> u32 {
        self.0[1]
    }

    pub fn age_bucket(&self) -> u32 {
        self.0[2]
    }

    pub fn siblings_spouses(&self) -> u32 {
        self.0[3]
    }

    pub fn parents_children(&self) -> u32 {
        self.0[4]
    }

    pub fn deck_rank(&self) -> u32 {
        self.0[5]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Components as `f64`, the form a model consumes.
    pub fn to_f64(&self) -> [f64; FEATURE_COUNT] {
        self.0.map(f64::from)
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [c, s, a, ss, pc, d] = self.0;
        write!(f, "[{c}, {s}, {a}, {ss}, {pc}, {d}]")
    }
}

// ---------------------------------------------------------------------------
// Sample – one encoded row with its outcome
// ---------------------------------------------------------------------------

/// An encoded passenger: identifier, features and label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// `PassengerId` of the source row.
    pub id: u64,
    pub features: FeatureVector,
    pub label: Label,
}

// ---------------------------------------------------------------------------
// Batch – samples removed from a repository in one draw
// ---------------------------------------------------------------------------

/// Parallel columns of ids, feature vectors and labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    pub ids: Vec<u64>,
    pub features: Vec<FeatureVector>,
    pub labels: Vec<Label>,
}

impl Batch {
    pub(crate) fn from_samples(samples: Vec<Sample>) -> Self {
        let mut batch = Batch {
            ids: Vec::with_capacity(samples.len()),
            features: Vec::with_capacity(samples.len()),
            labels: Vec::with_capacity(samples.len()),
        };
        for sample in samples {
            batch.ids.push(sample.id);
            batch.features.push(sample.features);
            batch.labels.push(sample.label);
        }
        batch
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(features, label)` pairs in batch order.
    pub fn iter(&self) -> impl Iterator<Item = (&FeatureVector, Label)> + '_ {
        self.features.iter().zip(self.labels.iter().copied())
    }

    /// One row of `f64` per sample: the feature matrix.
    pub fn feature_matrix(&self) -> Vec<Vec<f64>> {
        self.features.iter().map(|fv| fv.to_f64().to_vec()).collect()
    }

    /// Labels as an `f64` column vector.
    pub fn label_vector(&self) -> Vec<f64> {
        self.labels.iter().map(|&l| f64::from(l)).collect()
    }

    /// Fraction of samples labelled `1`, or `None` for an empty batch.
    pub fn positive_rate(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let positives = self.labels.iter().filter(|&&l| l == 1).count();
        Some(positives as f64 / self.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u64, label: Label) -> Sample {
        Sample {
            id,
            features: FeatureVector([3, 0, 1, 1, 2, 1]),
            label,
        }
    }

    #[test]
    fn test_accessors_follow_component_order() {
        let fv = FeatureVector([1, 1, 2, 0, 3, 6]);
        assert_eq!(fv.class(), 1);
        assert_eq!(fv.sex(), 1);
        assert_eq!(fv.age_bucket(), 2);
        assert_eq!(fv.siblings_spouses(), 0);
        assert_eq!(fv.parents_children(), 3);
        assert_eq!(fv.deck_rank(), 6);
        assert_eq!(fv.to_string(), "[1, 1, 2, 0, 3, 6]");
    }

    #[test]
    fn test_batch_numeric_views() {
        let batch = Batch::from_samples(vec![sample(1, 0), sample(2, 1), sample(3, 1)]);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.ids, vec![1, 2, 3]);
        assert_eq!(batch.feature_matrix()[0], vec![3.0, 0.0, 1.0, 1.0, 2.0, 1.0]);
        assert_eq!(batch.label_vector(), vec![0.0, 1.0, 1.0]);
        let rate = batch.positive_rate().unwrap();
        assert!((rate - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_batch_has_no_rate() {
        let batch = Batch::default();
        assert!(batch.is_empty());
        assert_eq!(batch.positive_rate(), None);
        assert_eq!(batch.iter().count(), 0);
    }
}
