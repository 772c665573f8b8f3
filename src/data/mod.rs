//! Data layer: schema, encoding, loading and batch sampling.
//!
//! Architecture:
//! ```text
//!  train.csv          test.csv + gender_submission.csv
//!        │                     │
//!        ▼                     ▼
//!   ┌──────────┐       ┌──────────────┐
//!   │  source   │       │    source     │  path or open reader → handle
//!   └──────────┘       └──────────────┘
//!        │                     │
//!        ▼                     ▼
//!   ┌──────────────────────────────────┐
//!   │ loader + encoder                   │  row → (FeatureVector, Label),
//!   │                                    │  test rows joined on PassengerId
//!   └──────────────────────────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │  Repository   │  Vec<Sample>, drained in random batches
//!   └──────────────┘
//! ```

pub mod encoder;
pub mod loader;
pub mod model;
pub mod repository;
pub mod schema;
pub mod source;
