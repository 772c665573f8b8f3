use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::loader::{self, LoadOptions};
use super::model::{Batch, Sample};
use super::source::DataSource;
use crate::error::{DataError, Result};

/// Which kind of source a repository was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    /// One source, label in the feature row.
    Training,
    /// Feature source joined with a separate label source.
    Testing,
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryKind::Training => write!(f, "training"),
            RepositoryKind::Testing => write!(f, "testing"),
        }
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// In-memory pool of encoded samples that hands out random batches.
///
/// # Draining
///
/// Batches are *consumed*: every sample returned by
/// [`drain_batch`](Repository::drain_batch) is removed from the pool, so
/// repeated calls walk through the data once without repetition (one epoch).
/// Load a fresh repository to go again.
///
/// A repository has a single consumer; wrap it in a lock to share it.
pub struct Repository {
    kind: RepositoryKind,
    samples: Vec<Sample>,
    rng: StdRng,
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("kind", &self.kind)
            .field("remaining", &self.samples.len())
            .finish()
    }
}

impl Repository {
    /// Load a training repository from a path or an open reader.
    pub fn training<'a>(source: impl Into<DataSource<'a>>) -> Result<Self> {
        Self::training_with(source, &LoadOptions::default())
    }

    pub fn training_with<'a>(source: impl Into<DataSource<'a>>, options: &LoadOptions) -> Result<Self> {
        let source = source.into();
        let origin = source.to_string();
        let samples = loader::load_training(source, options)?;
        let repo = Self::from_samples(RepositoryKind::Training, samples);
        repo.log_loaded(&origin);
        Ok(repo)
    }

    /// Load a testing repository: features from one source, labels from
    /// another, joined on passenger id.
    pub fn testing<'a, 'b>(
        features: impl Into<DataSource<'a>>,
        labels: impl Into<DataSource<'b>>,
    ) -> Result<Self> {
        Self::testing_with(features, labels, &LoadOptions::default())
    }

    pub fn testing_with<'a, 'b>(
        features: impl Into<DataSource<'a>>,
        labels: impl Into<DataSource<'b>>,
        options: &LoadOptions,
    ) -> Result<Self> {
        let features = features.into();
        let origin = features.to_string();
        let samples = loader::load_testing(features, labels.into(), options)?;
        let repo = Self::from_samples(RepositoryKind::Testing, samples);
        repo.log_loaded(&origin);
        Ok(repo)
    }

    /// Wrap already-encoded samples. The sampler is seeded from entropy.
    pub fn from_samples(kind: RepositoryKind, samples: Vec<Sample>) -> Self {
        Self {
            kind,
            samples,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reseed the sampler so batch selection is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn kind(&self) -> RepositoryKind {
        self.kind
    }

    /// Samples still in the pool.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read-only view of the remaining pool, in no particular order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// `[count of label 0, count of label 1]` among remaining samples.
    pub fn label_counts(&self) -> [usize; 2] {
        self.samples.iter().fold([0, 0], |mut acc, s| {
            acc[usize::from(s.label.min(1))] += 1;
            acc
        })
    }

    /// Remove `size` samples chosen uniformly at random without replacement
    /// and return them.
    ///
    /// Fails with `InvalidArgument` when `size` is 0 and with
    /// `InsufficientData` when fewer than `size` samples remain; the pool is
    /// left untouched in both cases.
    pub fn drain_batch(&mut self, size: usize) -> Result<Batch> {
        if size == 0 {
            return Err(DataError::InvalidArgument(
                "batch size must be at least 1".to_string(),
            ));
        }
        let available = self.samples.len();
        if size > available {
            return Err(DataError::InsufficientData {
                requested: size,
                available,
            });
        }

        self.samples.shuffle(&mut self.rng);
        let drawn = self.samples.split_off(available - size);

        log::debug!(
            "drew {} {} samples, {} remain",
            drawn.len(),
            self.kind,
            self.samples.len()
        );
        Ok(Batch::from_samples(drawn))
    }

    /// Same as [`drain_batch`](Repository::drain_batch): the returned samples
    /// leave the pool.
    pub fn get_batch(&mut self, size: usize) -> Result<Batch> {
        self.drain_batch(size)
    }

    /// Drain full batches of `size` until fewer than `size` samples remain.
    ///
    /// The leftover samples stay in the repository.
    pub fn drain_batches(&mut self, size: usize) -> DrainBatches<'_> {
        DrainBatches {
            repo: self,
            size,
            done: false,
        }
    }

    fn log_loaded(&self, origin: &str) {
        let [negative, positive] = self.label_counts();
        log::info!(
            "loaded {} repository from {}: {} samples ({} positive, {} negative)",
            self.kind,
            origin,
            self.len(),
            positive,
            negative
        );
    }
}

// ---------------------------------------------------------------------------
// DrainBatches – one pass over the pool
// ---------------------------------------------------------------------------

/// Iterator returned by [`Repository::drain_batches`].
pub struct DrainBatches<'r> {
    repo: &'r mut Repository,
    size: usize,
    done: bool,
}

impl Iterator for DrainBatches<'_> {
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.size == 0 {
            self.done = true;
            return Some(self.repo.drain_batch(0));
        }
        if self.repo.len() < self.size {
            self.done = true;
            return None;
        }
        Some(self.repo.drain_batch(self.size))
    }
}
