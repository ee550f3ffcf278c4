use std::collections::HashSet;

use derive_new::new;
use serde::{Deserialize, Serialize};

use super::sense::{Sense, SenseLabels};

/// A lexical test over a sentence
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Pattern {
    /// Case-sensitive substring search anywhere in the text
    Contains(String),

    /// Exact match against one alphanumeric token of the text
    Word(String),
}

impl Pattern {
    /// Test the pattern against a text
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Pattern::Contains(needle) => text.contains(needle.as_str()),
            Pattern::Word(word) => text
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == word),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Pattern::Contains(value) | Pattern::Word(value) => value.is_empty(),
        }
    }
}

/// A named test bound to the sense it indicates
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, new)]
pub struct Feature {
    /// The name written to the ranking log
    pub name: String,

    /// The lexical test
    pub pattern: Pattern,

    /// The sense a match indicates
    pub sense: Sense,
}

impl Feature {
    /// Apply the feature, returning whether it matched along with its sense
    pub fn evaluate(&self, text: &str) -> (bool, Sense) {
        (self.matches(text), self.sense)
    }

    /// Whether the feature's test matches the text
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// An ordered, validated collection of features over two senses.
///
/// The order is significant: it is the tie-break when two features rank equally, and
/// the order in which scores are written to the ranking log.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeatureSetDef")]
pub struct FeatureSet {
    labels: SenseLabels,
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct FeatureSetDef {
    labels: SenseLabels,
    features: Vec<Feature>,
}

impl TryFrom<FeatureSetDef> for FeatureSet {
    type Error = FeatureSetError;

    fn try_from(def: FeatureSetDef) -> Result<Self, Self::Error> {
        FeatureSet::new(def.labels, def.features)
    }
}

impl FeatureSet {
    /// Validate and build a feature set
    pub fn new(labels: SenseLabels, features: Vec<Feature>) -> Result<Self, FeatureSetError> {
        if features.is_empty() {
            return Err(FeatureSetError::Empty);
        }

        if labels.first == labels.second {
            return Err(FeatureSetError::SameLabels(labels.first));
        }

        let mut names = HashSet::with_capacity(features.len());
        for feature in &features {
            if feature.pattern.is_empty() {
                return Err(FeatureSetError::EmptyPattern(feature.name.clone()));
            }

            if !names.insert(feature.name.as_str()) {
                return Err(FeatureSetError::DuplicateName(feature.name.clone()));
            }
        }

        Ok(Self { labels, features })
    }

    /// The hand-written features separating "phone line" from "product line".
    ///
    /// Optional trailing letters (`calls?`, `sale?`) never change whether an unanchored
    /// search succeeds, so each test is the bare stem.
    pub fn line() -> Self {
        use Sense::{First as Phone, Second as Product};

        let features = [
            ("telephone_test", "telephone", Phone),
            ("sale_test", "sal", Product),
            ("sell_test", "sell", Product),
            ("call_test", "call", Phone),
            ("voice_test", "voice", Phone),
            ("market_test", "market", Product),
            ("service_test", "service", Phone),
            ("food_test", "food", Product),
        ]
        .into_iter()
        .map(|(name, stem, sense)| {
            Feature::new(name.to_string(), Pattern::Contains(stem.to_string()), sense)
        })
        .collect();

        Self {
            labels: SenseLabels::new("phone".to_string(), "product".to_string()),
            features,
        }
    }

    /// Parse a feature set from YAML
    pub fn from_yaml(source: &str) -> Result<Self, FeatureSetError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parse a feature set from JSON
    pub fn from_json(source: &str) -> Result<Self, FeatureSetError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a feature set file, choosing YAML for `.yaml`/`.yml` and JSON otherwise
    pub async fn load(path: &str) -> Result<Self, FeatureSetError> {
        let source = tokio::fs::read_to_string(path).await?;

        if path.ends_with(".yaml") || path.ends_with(".yml") {
            Self::from_yaml(&source)
        } else {
            Self::from_json(&source)
        }
    }

    /// The corpus labels of both senses
    pub fn labels(&self) -> &SenseLabels {
        &self.labels
    }

    /// The features, in definition order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// The number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Always false for a validated set
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Feature Set Error
#[derive(thiserror::Error, Debug)]
pub enum FeatureSetError {
    /// A feature set needs at least one feature
    #[error("feature set has no features")]
    Empty,

    /// Both senses were given the same label
    #[error("both senses are labelled {0}")]
    SameLabels(String),

    /// Feature names key the ranking log and must be unique
    #[error("duplicate feature name {0}")]
    DuplicateName(String),

    /// A pattern with nothing to match
    #[error("feature {0} has an empty pattern")]
    EmptyPattern(String),

    /// The feature set file could not be read
    #[error("unable to read feature set: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML was not a valid feature set
    #[error("invalid feature set YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON was not a valid feature set
    #[error("invalid feature set JSON: {0}")]
    Json(#[from] serde_json::Error),
}
