pub mod provider;
pub mod suggester;

pub use provider::{ClassificationPort, HttpClassificationProvider};
pub use suggester::GroupSuggester;
