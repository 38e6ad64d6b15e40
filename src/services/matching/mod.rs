pub mod normalizer;
pub mod scorer;

pub use scorer::{best_match, ScoredMatch};
