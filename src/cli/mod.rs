/// Built-in feature sets
pub mod feature_sets;
