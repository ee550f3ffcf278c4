use derive_new::new;
use serde::{Deserialize, Serialize};

use super::{
    ranker::FeatureList,
    sense::{Sense, SenseCounts},
};

/// An occurrence of the ambiguous word to classify, with its context sentences
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Instance {
    /// The instance identifier
    pub id: String,

    /// Context sentences; `None` where the corpus had no usable text
    pub sentences: Vec<Option<String>>,
}

/// The sense assigned to an instance
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Classification {
    /// The instance identifier
    pub instance: String,

    /// The assigned sense
    pub sense: Sense,
}

/// Which sentence decides an instance when several of them match a feature
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Every sentence is scanned and the last one with a match decides
    #[default]
    LastMatchingSentence,

    /// Scanning stops at the first sentence with a match
    FirstMatchingSentence,
}

/// The fallback sense: the training majority, or `tie` when the counts are level
pub fn default_sense(counts: &SenseCounts, tie: Sense) -> Sense {
    counts.majority(tie)
}

/// Assign a sense to one instance.
///
/// Within a sentence the lowest-positioned matching feature wins.
pub fn classify_instance(
    list: &FeatureList,
    instance: &Instance,
    default: Sense,
    policy: MatchPolicy,
) -> Sense {
    let mut matches = instance
        .sentences
        .iter()
        .flatten()
        .filter_map(|text| list.first_match(text))
        .map(|entry| entry.sense());

    let sense = match policy {
        MatchPolicy::LastMatchingSentence => matches.last(),
        MatchPolicy::FirstMatchingSentence => matches.next(),
    };

    sense.unwrap_or(default)
}

/// Assign a sense to every instance, preserving input order
pub fn classify(
    list: &FeatureList,
    instances: &[Instance],
    default: Sense,
    policy: MatchPolicy,
) -> Vec<Classification> {
    instances
        .iter()
        .map(|instance| {
            Classification::new(
                instance.id.clone(),
                classify_instance(list, instance, default, policy),
            )
        })
        .collect()
}
