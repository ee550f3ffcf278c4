use std::{collections::HashMap, fmt::Display};

use derive_new::new;
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};

/// One `<answer instance="…" senseid="…"/>` line
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, new)]
pub struct Answer {
    /// The instance identifier
    #[serde(rename = "@instance")]
    pub instance: String,

    /// The sense label
    #[serde(rename = "@senseid")]
    pub senseid: String,
}

impl Answer {
    /// Parse an answer line, returning `None` for anything that is not an answer tag
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        // quick-xml deserialises any element, so check for the answer tag first
        if !line.starts_with("<answer ") {
            return None;
        }

        quick_xml::de::from_str(line).ok()
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<answer instance=\"{}\" senseid=\"{}\"/>",
            escape(self.instance.as_str()),
            escape(self.senseid.as_str())
        )
    }
}

/// Sense labels keyed by instance identifier
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AnswerKey(HashMap<String, String>);

impl AnswerKey {
    /// Collect the answers found in a sequence of lines; later answers for an id win
    pub fn from_lines<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Self {
        lines
            .into_iter()
            .filter_map(|line| Answer::parse(line.as_ref()))
            .collect()
    }

    /// The sense recorded for an instance
    pub fn get(&self, instance: &str) -> Option<&str> {
        self.0.get(instance).map(String::as_str)
    }

    /// The number of instances
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no answers were found
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All (instance, sense) pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<Answer> for AnswerKey {
    fn from_iter<T: IntoIterator<Item = Answer>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|answer| (answer.instance, answer.senseid))
                .collect(),
        )
    }
}
