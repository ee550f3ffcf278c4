use std::fmt::Display;

use derive_new::new;
use log::{debug, warn};

use super::{
    feature::{Feature, FeatureSet},
    sense::{Sense, SenseLabels},
};

/// A labelled training sentence; `text` is `None` when the corpus had no usable text
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Example {
    /// The sentence text
    pub text: Option<String>,

    /// The gold sense
    pub sense: Sense,
}

/// Training sentences partitioned by gold sense
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Examples {
    first: Vec<Option<String>>,
    second: Vec<Option<String>>,
}

impl Examples {
    /// Add one example to its sense's partition
    pub fn push(&mut self, example: Example) {
        match example.sense {
            Sense::First => self.first.push(example.text),
            Sense::Second => self.second.push(example.text),
        }
    }

    /// The texts labelled with a sense
    pub fn texts(&self, sense: Sense) -> &[Option<String>] {
        match sense {
            Sense::First => &self.first,
            Sense::Second => &self.second,
        }
    }

    /// The number of examples across both senses
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    /// Whether there are no examples at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Example> for Examples {
    fn from_iter<T: IntoIterator<Item = Example>>(iter: T) -> Self {
        let mut examples = Examples::default();
        iter.into_iter().for_each(|example| examples.push(example));
        examples
    }
}

/// The log-likelihood discrimination score of a feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// `log10(prob_sense / prob_other)`
    Ratio(f64),

    /// The feature never matched the opposing sense
    Undivided,

    /// The feature never matched anything
    Unobserved,
}

impl Score {
    /// The sentinel standing in for a ratio with a zero denominator
    pub const SENTINEL: f64 = 1.0;

    /// The numeric value used for ordering
    pub fn value(&self) -> f64 {
        match self {
            Score::Ratio(ratio) => *ratio,
            Score::Undivided | Score::Unobserved => Self::SENTINEL,
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Score::Ratio(ratio) => write!(f, "{}", format_ratio(*ratio)),
            Score::Undivided | Score::Unobserved => write!(f, "1"),
        }
    }
}

/// Render a float with the shortest round-trip digits, always showing a fractional part
/// and switching to a two-digit-exponent scientific form outside `[1e-4, 1e16)`.
fn format_ratio(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        return format!("{sign}inf");
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{:e}", value);

        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };

                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => formatted,
        };
    }

    let formatted = format!("{}", value);
    if formatted.contains('.') {
        formatted
    } else {
        format!("{formatted}.0")
    }
}

/// A feature together with its training score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredFeature {
    /// The feature
    pub feature: Feature,

    /// Its discrimination score
    pub score: Score,

    /// Its position in the feature set, used for tie-breaking and log order
    pub position: usize,
}

impl ScoredFeature {
    /// The sense this feature assigns
    pub fn sense(&self) -> Sense {
        self.feature.sense
    }
}

/// One line of the ranking log
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AuditRecord<'a> {
    /// The feature name
    pub name: &'a str,

    /// The score, rendered for the log
    pub score: String,

    /// The label of the feature's sense
    pub sense: &'a str,
}

/// Features sorted ascending by score: the trained decision list
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureList {
    labels: SenseLabels,
    entries: Vec<ScoredFeature>,
}

impl FeatureList {
    /// The labels of both senses
    pub fn labels(&self) -> &SenseLabels {
        &self.labels
    }

    /// Scored features in decision order
    pub fn iter(&self) -> std::slice::Iter<'_, ScoredFeature> {
        self.entries.iter()
    }

    /// The number of ranked features
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest-precedence feature matching the text
    pub fn first_match(&self, text: &str) -> Option<&ScoredFeature> {
        self.entries.iter().find(|entry| entry.feature.matches(text))
    }

    /// Log records in scoring order, which is the feature set's definition order
    pub fn audit_records(&self) -> Vec<AuditRecord<'_>> {
        let mut scored: Vec<&ScoredFeature> = self.entries.iter().collect();
        scored.sort_by_key(|entry| entry.position);

        scored
            .into_iter()
            .map(|entry| AuditRecord {
                name: &entry.feature.name,
                score: entry.score.to_string(),
                sense: self.labels.label(entry.sense()),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a FeatureList {
    type Item = &'a ScoredFeature;
    type IntoIter = std::slice::Iter<'a, ScoredFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn count_matches(feature: &Feature, texts: &[Option<String>]) -> usize {
    texts
        .iter()
        .flatten()
        .filter(|text| feature.matches(text))
        .count()
}

/// Score a feature by how strongly it separates its own sense from the other one
pub fn log_likelihood(feature: &Feature, examples: &Examples) -> Score {
    let count_sense = count_matches(feature, examples.texts(feature.sense));
    let count_other = count_matches(feature, examples.texts(feature.sense.other()));

    let total = count_sense + count_other;
    if total == 0 {
        warn!("Feature {} matched no training text", feature.name);
        return Score::Unobserved;
    }

    let prob_sense = count_sense as f64 / total as f64;
    let prob_other = count_other as f64 / total as f64;

    if prob_other == 0.0 {
        Score::Undivided
    } else {
        Score::Ratio((prob_sense / prob_other).log10())
    }
}

/// Score every feature and sort ascending by score, keeping definition order on ties
pub fn rank(features: &FeatureSet, examples: &Examples) -> FeatureList {
    let mut entries: Vec<ScoredFeature> = features
        .features()
        .iter()
        .enumerate()
        .map(|(position, feature)| {
            let score = log_likelihood(feature, examples);

            debug!("{}\t{}\t{}", feature.name, score, feature.sense);

            ScoredFeature {
                feature: feature.clone(),
                score,
                position,
            }
        })
        .collect();

    entries.sort_by(|a, b| a.score.value().total_cmp(&b.score.value()));

    FeatureList {
        labels: features.labels().clone(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipelines::decision_list::feature::Pattern;

    fn contains(name: &str, needle: &str, sense: Sense) -> Feature {
        Feature::new(
            name.to_string(),
            Pattern::Contains(needle.to_string()),
            sense,
        )
    }

    fn examples(first: &[&str], second: &[&str]) -> Examples {
        first
            .iter()
            .map(|text| Example::new(Some(text.to_string()), Sense::First))
            .chain(
                second
                    .iter()
                    .map(|text| Example::new(Some(text.to_string()), Sense::Second)),
            )
            .collect()
    }

    fn feature_set(features: Vec<Feature>) -> FeatureSet {
        FeatureSet::new(
            SenseLabels::new("phone".to_string(), "product".to_string()),
            features,
        )
        .unwrap()
    }

    #[test]
    fn scores_the_log_ratio_of_sense_matches() {
        let training = examples(
            &["call a", "call b", "call c", "d", "e"],
            &["call f", "g", "h", "i", "j"],
        );

        let score = log_likelihood(&contains("call_test", "call", Sense::First), &training);

        match score {
            Score::Ratio(value) => assert!((value - 3f64.log10()).abs() < 1e-12),
            other => panic!("expected a ratio, got {other:?}"),
        }
        assert_eq!(score.to_string(), "0.47712125471966244");
    }

    #[test]
    fn a_feature_absent_from_the_other_sense_gets_the_sentinel() {
        let training = examples(&["call my phone line"], &["new product line sale"]);

        let call = log_likelihood(&contains("call", "call", Sense::First), &training);
        let sale = log_likelihood(&contains("sale", "sale", Sense::Second), &training);

        assert_eq!(call, Score::Undivided);
        assert_eq!(sale, Score::Undivided);
        assert_eq!(call.value(), 1.0);
        assert_eq!(call.to_string(), "1");
    }

    #[test]
    fn a_feature_that_never_matches_still_gets_a_score() {
        let training = examples(&["a"], &["b"]);

        let score = log_likelihood(&contains("zebra", "zebra", Sense::First), &training);

        assert_eq!(score, Score::Unobserved);
        assert_eq!(score.value(), Score::SENTINEL);
    }

    #[test]
    fn a_feature_only_seen_in_the_other_sense_scores_negative_infinity() {
        let training = examples(&["a"], &["sale"]);

        let score = log_likelihood(&contains("sale", "sale", Sense::First), &training);

        assert_eq!(score.value(), f64::NEG_INFINITY);
        assert_eq!(score.to_string(), "-inf");
    }

    #[test]
    fn missing_texts_are_not_counted() {
        let training: Examples = [
            Example::new(None, Sense::First),
            Example::new(Some("call".to_string()), Sense::First),
            Example::new(None, Sense::Second),
            Example::new(Some("call".to_string()), Sense::Second),
        ]
        .into_iter()
        .collect();

        let score = log_likelihood(&contains("call", "call", Sense::First), &training);

        assert_eq!(training.len(), 4);
        assert_eq!(score, Score::Ratio(0.0));
        assert_eq!(score.to_string(), "0.0");
    }

    #[test]
    fn rank_sorts_ascending_with_stable_ties() {
        let training = examples(
            &["call", "call", "call", "voice", "x"],
            &["call", "sale", "sale", "voice", "voice"],
        );
        let set = feature_set(vec![
            contains("sale", "sale", Sense::Second),
            contains("call", "call", Sense::First),
            contains("voice", "voice", Sense::First),
            contains("food", "food", Sense::Second),
        ]);

        let list = rank(&set, &training);
        let order: Vec<_> = list.iter().map(|e| e.feature.name.as_str()).collect();

        // voice: log10(1/2) < call: log10(3) < sale, food: sentinel 1 in set order
        assert_eq!(order, vec!["voice", "call", "sale", "food"]);
        assert_eq!(list.len(), set.len());
        assert!(list
            .iter()
            .zip(list.iter().skip(1))
            .all(|(a, b)| a.score.value() <= b.score.value()));
    }

    #[test]
    fn audit_records_follow_definition_order() {
        let training = examples(&["call", "voice"], &["voice", "voice"]);
        let set = feature_set(vec![
            contains("call_test", "call", Sense::First),
            contains("voice_test", "voice", Sense::First),
        ]);

        let list = rank(&set, &training);
        let records = list.audit_records();

        assert_eq!(list.iter().next().unwrap().feature.name, "voice_test");
        assert_eq!(
            records,
            vec![
                AuditRecord {
                    name: "call_test",
                    score: "1".to_string(),
                    sense: "phone",
                },
                AuditRecord {
                    name: "voice_test",
                    score: "-0.3010299956639812".to_string(),
                    sense: "phone",
                },
            ]
        );
    }

    #[test]
    fn ranking_is_deterministic() {
        let training = examples(&["call sale", "voice"], &["sale", "food voice"]);
        let set = FeatureSet::line();

        assert_eq!(rank(&set, &training), rank(&set, &training));
    }

    #[test]
    fn formats_ratios_like_the_reference_output() {
        assert_eq!(format_ratio(0.5), "0.5");
        assert_eq!(format_ratio(2.0), "2.0");
        assert_eq!(format_ratio(-0.0), "-0.0");
        assert_eq!(format_ratio(0.0001), "0.0001");
        assert_eq!(format_ratio(0.00001234), "1.234e-05");
        assert_eq!(format_ratio(-2.5e-7), "-2.5e-07");
        assert_eq!(format_ratio(1e16), "1e+16");
        assert_eq!(format_ratio(f64::INFINITY), "inf");
    }
}
