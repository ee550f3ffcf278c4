use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt::Display,
};

/// Answer tags and keys
pub mod answer;

pub use answer::{Answer, AnswerKey};

use crate::utils::files::read_lines;

/// Counts of (predicted, gold) sense pairs
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfusionMatrix {
    predicted: BTreeSet<String>,
    gold: BTreeSet<String>,
    counts: BTreeMap<(String, String), usize>,
}

impl ConfusionMatrix {
    /// Count one (predicted, gold) pair
    pub fn add(&mut self, predicted: &str, gold: &str) {
        self.predicted.insert(predicted.to_string());
        self.gold.insert(gold.to_string());
        *self
            .counts
            .entry((predicted.to_string(), gold.to_string()))
            .or_default() += 1;
    }

    /// How often `predicted` was assigned where `gold` was correct
    pub fn count(&self, predicted: &str, gold: &str) -> usize {
        self.counts
            .get(&(predicted.to_string(), gold.to_string()))
            .copied()
            .unwrap_or_default()
    }
}

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let corner = "predicted\\gold";
        let label_width = self
            .predicted
            .iter()
            .map(String::len)
            .chain(std::iter::once(corner.len()))
            .max()
            .unwrap_or_default();
        let widths: Vec<usize> = self
            .gold
            .iter()
            .map(|gold| {
                self.predicted
                    .iter()
                    .map(|p| self.count(p, gold).to_string().len())
                    .chain(std::iter::once(gold.len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        write!(f, "{corner:<label_width$}")?;
        for (gold, width) in self.gold.iter().zip(widths.iter().copied()) {
            write!(f, "  {gold:>width$}")?;
        }
        writeln!(f)?;

        for predicted in &self.predicted {
            write!(f, "{predicted:<label_width$}")?;
            for (gold, width) in self.gold.iter().zip(widths.iter().copied()) {
                write!(f, "  {:>width$}", self.count(predicted, gold))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Accuracy and confusion of predicted answers against a gold key
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// Gold instances whose prediction matched, as a percentage of all gold instances
    pub accuracy: f64,

    /// The share of the most frequent gold sense, as a percentage
    pub baseline: f64,

    /// Gold instances with a matching prediction
    pub matched: usize,

    /// Gold instances
    pub total: usize,

    /// Predicted against gold senses, over instances present in both keys
    pub confusion: ConfusionMatrix,
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "The baseline accuracy is {}%", self.baseline)?;
        writeln!(f, "Model Accuracy is {}", self.accuracy)?;
        writeln!(f)?;
        writeln!(f, "Confusion Matrix:")?;
        write!(f, "{}", self.confusion)
    }
}

/// Compare predicted answers against a gold key
pub fn score(predicted: &AnswerKey, gold: &AnswerKey) -> Result<Report, ScoringError> {
    if gold.is_empty() {
        return Err(ScoringError::EmptyKey);
    }

    let mut matched = 0;
    let mut confusion = ConfusionMatrix::default();
    let mut gold_counts: HashMap<&str, usize> = HashMap::new();

    for (instance, gold_sense) in gold.iter() {
        *gold_counts.entry(gold_sense).or_default() += 1;

        if let Some(predicted_sense) = predicted.get(instance) {
            confusion.add(predicted_sense, gold_sense);

            if predicted_sense == gold_sense {
                matched += 1;
            }
        }
    }

    let total = gold.len();
    let majority = gold_counts.values().copied().max().unwrap_or_default();

    Ok(Report {
        accuracy: matched as f64 / total as f64 * 100.0,
        baseline: majority as f64 / total as f64 * 100.0,
        matched,
        total,
        confusion,
    })
}

/// Load two answer files and score the first against the second
pub async fn score_files(predicted: &str, gold: &str) -> Result<Report, ScoringError> {
    let predicted = AnswerKey::from_lines(read_lines(predicted).await?);
    let gold = AnswerKey::from_lines(read_lines(gold).await?);

    score(&predicted, &gold)
}

/// Scoring Error
#[derive(thiserror::Error, Debug)]
pub enum ScoringError {
    /// An answer file could not be read
    #[error("unable to read answers: {0}")]
    Io(#[from] std::io::Error),

    /// The gold key holds no answers
    #[error("the gold key contains no answers")]
    EmptyKey,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(pairs: &[(&str, &str)]) -> AnswerKey {
        pairs
            .iter()
            .map(|(i, s)| Answer::new(i.to_string(), s.to_string()))
            .collect()
    }

    #[test]
    fn scores_accuracy_against_the_gold_key() {
        let gold = key(&[
            ("a", "phone"),
            ("b", "phone"),
            ("c", "product"),
            ("d", "phone"),
        ]);
        let predicted = key(&[
            ("a", "phone"),
            ("b", "product"),
            ("c", "product"),
            ("z", "phone"),
        ]);

        let report = score(&predicted, &gold).unwrap();

        assert_eq!(report.matched, 2);
        assert_eq!(report.total, 4);
        assert_eq!(report.accuracy, 50.0);
        assert_eq!(report.baseline, 75.0);
        assert_eq!(report.confusion.count("phone", "phone"), 1);
        assert_eq!(report.confusion.count("product", "phone"), 1);
        assert_eq!(report.confusion.count("product", "product"), 1);
        assert_eq!(report.confusion.count("phone", "product"), 0);
    }

    #[test]
    fn renders_the_report() {
        let gold = key(&[("a", "phone"), ("b", "product")]);
        let predicted = key(&[("a", "phone"), ("b", "phone")]);

        let report = score(&predicted, &gold).unwrap();

        assert_eq!(
            report.to_string(),
            "The baseline accuracy is 50%\n\
             Model Accuracy is 50\n\
             \n\
             Confusion Matrix:\n\
             predicted\\gold  phone  product\n\
             phone               1        1\n"
        );
    }

    #[test]
    fn an_empty_gold_key_is_an_error() {
        assert!(matches!(
            score(&key(&[("a", "phone")]), &AnswerKey::default()),
            Err(ScoringError::EmptyKey)
        ));
    }
}
