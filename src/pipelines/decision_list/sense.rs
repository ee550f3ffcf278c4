use std::fmt::Display;

use derive_new::new;
use serde::{Deserialize, Serialize};

/// The unique string token for the first sense
pub static FIRST: &str = "first";

/// The unique string token for the second sense
pub static SECOND: &str = "second";

/// One of the two senses a decision list separates
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    /// The first sense (e.g., "phone")
    First,

    /// The second sense (e.g., "product")
    Second,
}

impl Sense {
    /// The opposing sense
    pub fn other(self) -> Self {
        match self {
            Sense::First => Sense::Second,
            Sense::Second => Sense::First,
        }
    }
}

impl TryFrom<&str> for Sense {
    type Error = SenseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            v if v == FIRST => Ok(Sense::First),
            v if v == SECOND => Ok(Sense::Second),
            _ => Err(SenseError::Unknown(value.to_string())),
        }
    }
}

impl Display for Sense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Sense::First => FIRST,
            Sense::Second => SECOND,
        };

        write!(f, "{}", name)
    }
}

/// The corpus labels bound to each sense of a task
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, new)]
pub struct SenseLabels {
    /// The label of the first sense
    pub first: String,

    /// The label of the second sense
    pub second: String,
}

impl SenseLabels {
    /// The corpus label for a sense
    pub fn label(&self, sense: Sense) -> &str {
        match sense {
            Sense::First => &self.first,
            Sense::Second => &self.second,
        }
    }

    /// Resolve a corpus label, if it belongs to this task
    pub fn sense_of(&self, label: &str) -> Option<Sense> {
        if label == self.first {
            Some(Sense::First)
        } else if label == self.second {
            Some(Sense::Second)
        } else {
            None
        }
    }
}

/// Tallies of gold labels per sense
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SenseCounts {
    /// Labels of the first sense
    pub first: usize,

    /// Labels of the second sense
    pub second: usize,
}

impl SenseCounts {
    /// Count one more label
    pub fn add(&mut self, sense: Sense) {
        match sense {
            Sense::First => self.first += 1,
            Sense::Second => self.second += 1,
        }
    }

    /// The total number of labels seen
    pub fn total(&self) -> usize {
        self.first + self.second
    }

    /// The sense with strictly more labels, or `tie` when neither has
    pub fn majority(&self, tie: Sense) -> Sense {
        match self.first.cmp(&self.second) {
            std::cmp::Ordering::Greater => Sense::First,
            std::cmp::Ordering::Less => Sense::Second,
            std::cmp::Ordering::Equal => tie,
        }
    }
}

impl FromIterator<Sense> for SenseCounts {
    fn from_iter<T: IntoIterator<Item = Sense>>(iter: T) -> Self {
        let mut counts = SenseCounts::default();
        iter.into_iter().for_each(|sense| counts.add(sense));
        counts
    }
}

/// Sense Error
#[derive(thiserror::Error, Debug)]
pub enum SenseError {
    /// No sense found for the given string
    #[error("no sense found for {0} (expected 'first' or 'second')")]
    Unknown(String),
}
