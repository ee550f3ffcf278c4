use super::{assigner::MatchPolicy, sense::Sense};

/// Define configuration struct for a disambiguation run
#[derive(burn::config::Config, Debug)]
pub struct Config {
    /// The built-in feature set to rank (e.g., "line")
    #[config(default = "\"line\".to_string()")]
    pub feature_set: String,

    /// A YAML or JSON feature set file, used instead of `feature_set` when present
    pub feature_file: Option<String>,

    /// The fallback sense when the training senses are evenly split
    #[config(default = "Sense::First")]
    pub tie_sense: Sense,

    /// Which sentence decides an instance with several matching sentences
    #[config(default = "MatchPolicy::LastMatchingSentence")]
    pub match_policy: MatchPolicy,
}
