//! Feature encoding and random batch sampling for the passenger-survival
//! dataset.
//!
//! Rows are encoded into six-component [`FeatureVector`]s
//! (class, sex, age bucket, siblings/spouses, parents/children, deck rank)
//! and held in a [`Repository`] that hands out random batches, removing
//! each drawn sample from the pool.
//!
//! ```no_run
//! use titanic_batches::Repository;
//!
//! # fn main() -> titanic_batches::Result<()> {
//! let mut train = Repository::training("train.csv")?.with_seed(42);
//! while train.len() >= 20 {
//!     let batch = train.drain_batch(20)?;
//!     let _x = batch.feature_matrix();
//!     let _y = batch.label_vector();
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;

pub use config::LoaderConfig;
pub use data::encoder::{age_bucket, deck_rank, FeatureEncoder, Fields};
pub use data::loader::LoadOptions;
pub use data::model::{Batch, FeatureVector, Label, Sample, FEATURE_COUNT};
pub use data::repository::{DrainBatches, Repository, RepositoryKind};
pub use data::schema::{ColumnLayout, LabelLayout};
pub use data::source::DataSource;
pub use error::{DataError, Result};
