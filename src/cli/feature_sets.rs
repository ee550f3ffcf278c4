use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;

use crate::pipelines::decision_list::{Config, FeatureSet, FeatureSetError};

/// The unique string token for the "phone line" vs. "product line" features
pub static LINE: &str = "line";

/// Built-in feature sets
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FeatureSetName {
    /// The `line` feature set
    Line,
}

impl FeatureSetName {
    /// Build the named feature set
    pub fn build(&self) -> FeatureSet {
        match self {
            FeatureSetName::Line => FeatureSet::line(),
        }
    }
}

lazy_static! {
    /// Built-in feature sets by name
    pub static ref FEATURE_SETS_BY_NAME: HashMap<&'static str, FeatureSetName> =
        [(LINE, FeatureSetName::Line)].iter().copied().collect();
}

impl TryFrom<&str> for FeatureSetName {
    type Error = FeatureSetNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        FEATURE_SETS_BY_NAME
            .get(value.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| FeatureSetNameError::Unknown(value.to_string()))
    }
}

impl Display for FeatureSetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeatureSetName::Line => LINE,
        };

        write!(f, "{}", name)
    }
}

/// Feature Set Name Error
#[derive(thiserror::Error, Debug)]
pub enum FeatureSetNameError {
    /// No built-in feature set found for the given string
    #[error("no feature set found for {0}")]
    Unknown(String),

    /// The feature set file was invalid
    #[error(transparent)]
    File(#[from] FeatureSetError),
}

/// Resolve the feature set a config asks for: its file if set, else the named built-in
pub async fn resolve(config: &Config) -> Result<FeatureSet, FeatureSetNameError> {
    match &config.feature_file {
        Some(path) => Ok(FeatureSet::load(path).await?),
        None => Ok(FeatureSetName::try_from(config.feature_set.as_str())?.build()),
    }
}
