/// The two senses of a task and their labels
pub mod sense;

/// Features and feature sets
pub mod feature;

/// Log-likelihood ranking
pub mod ranker;

/// First-match sense assignment
pub mod assigner;

/// The ranking log
pub mod audit;

/// Run configuration
pub mod config;

pub use assigner::{
    classify, classify_instance, default_sense, Classification, Instance, MatchPolicy,
};
pub use audit::{append_audit, write_audit};
pub use config::Config;
pub use feature::{Feature, FeatureSet, FeatureSetError, Pattern};
pub use ranker::{rank, Example, Examples, FeatureList, Score, ScoredFeature};
pub use sense::{Sense, SenseCounts, SenseLabels};

use log::info;

use crate::{
    datasets::{senseval, CorpusError},
    scoring::Answer,
};

/// The products of one training and classification run
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The ranked decision list
    pub feature_list: FeatureList,

    /// The fallback sense used for unmatched instances
    pub default_sense: Sense,

    /// One classification per test instance, in corpus order
    pub classifications: Vec<Classification>,
}

impl Outcome {
    /// The classifications as answer tags, using the corpus labels
    pub fn answers(&self) -> Vec<Answer> {
        let labels = self.feature_list.labels();

        self.classifications
            .iter()
            .map(|c| Answer::new(c.instance.clone(), labels.label(c.sense).to_string()))
            .collect()
    }
}

/// Rank the features on the training corpus, then classify the test corpus
pub fn disambiguate(
    features: &FeatureSet,
    train: &senseval::Dataset,
    test: &senseval::Dataset,
    config: &Config,
) -> Result<Outcome, CorpusError> {
    let labels = features.labels();

    let examples = train.examples(labels)?;
    info!(
        "Ranking {} features over {} training sentences",
        features.len(),
        examples.len()
    );

    let feature_list = rank(features, &examples);

    let counts = train.sense_counts(labels)?;
    let default_sense = default_sense(&counts, config.tie_sense);
    info!(
        "Default sense is {} ({} {}, {} {})",
        labels.label(default_sense),
        counts.first,
        labels.first,
        counts.second,
        labels.second
    );

    let instances = test.instances();
    let classifications = classify(&feature_list, &instances, default_sense, config.match_policy);
    info!("Classified {} test instances", classifications.len());

    Ok(Outcome {
        feature_list,
        default_sense,
        classifications,
    })
}
