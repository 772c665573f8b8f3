//! Fixed column offsets of the passenger CSV files.
//!
//! Training rows:
//! `PassengerId, Survived, Pclass, Name, Sex, Age, SibSp, Parch, Ticket, Fare, Cabin, Embarked`
//!
//! Testing feature rows are the same minus `Survived`, so every offset after
//! the id is one lower. Label rows are `PassengerId, Survived`.

use serde::{Deserialize, Serialize};

pub const TRAIN_ID: usize = 0;
pub const TRAIN_SURVIVED: usize = 1;
pub const TRAIN_CLASS: usize = 2;
pub const TRAIN_NAME: usize = 3;
pub const TRAIN_SEX: usize = 4;
pub const TRAIN_AGE: usize = 5;
pub const TRAIN_SIBLINGS_SPOUSES: usize = 6;
pub const TRAIN_PARENTS_CHILDREN: usize = 7;
pub const TRAIN_TICKET: usize = 8;
pub const TRAIN_FARE: usize = 9;
pub const TRAIN_CABIN: usize = 10;
pub const TRAIN_EMBARKED: usize = 11;

pub const TEST_ID: usize = 0;
pub const TEST_CLASS: usize = 1;
pub const TEST_SEX: usize = 3;
pub const TEST_AGE: usize = 4;
pub const TEST_SIBLINGS_SPOUSES: usize = 5;
pub const TEST_PARENTS_CHILDREN: usize = 6;
pub const TEST_CABIN: usize = 9;

pub const LABEL_ID: usize = 0;
pub const LABEL_SURVIVED: usize = 1;

/// Where the encoder finds each field it reads in a feature row.
///
/// Name, ticket, fare and port of embarkation are never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub id: usize,
    pub class: usize,
    pub sex: usize,
    pub age: usize,
    pub siblings_spouses: usize,
    pub parents_children: usize,
    pub cabin: usize,
    /// Present only when the label lives in the same row as the features.
    pub label: Option<usize>,
}

impl ColumnLayout {
    /// `train.csv`: features and label in one row.
    pub const TRAINING: ColumnLayout = ColumnLayout {
        id: TRAIN_ID,
        class: TRAIN_CLASS,
        sex: TRAIN_SEX,
        age: TRAIN_AGE,
        siblings_spouses: TRAIN_SIBLINGS_SPOUSES,
        parents_children: TRAIN_PARENTS_CHILDREN,
        cabin: TRAIN_CABIN,
        label: Some(TRAIN_SURVIVED),
    };

    /// `test.csv`: features only, labels come from a second source.
    pub const TESTING: ColumnLayout = ColumnLayout {
        id: TEST_ID,
        class: TEST_CLASS,
        sex: TEST_SEX,
        age: TEST_AGE,
        siblings_spouses: TEST_SIBLINGS_SPOUSES,
        parents_children: TEST_PARENTS_CHILDREN,
        cabin: TEST_CABIN,
        label: None,
    };
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout::TRAINING
    }
}

/// Layout of the label source joined to testing features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelLayout {
    pub id: usize,
    pub label: usize,
}

impl Default for LabelLayout {
    fn default() -> Self {
        LabelLayout {
            id: LABEL_ID,
            label: LABEL_SURVIVED,
        }
    }
}
