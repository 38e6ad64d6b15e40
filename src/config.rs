//! Acceptance thresholds for the matching and classification paths.
//!
//! All scores are on the 0–100 fuzzy scale. Each decision type has exactly
//! one threshold; call sites take a `Thresholds` instead of inlining numbers.

/// Score thresholds, one per decision type.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Minimum score for pre-selecting "associate with existing canonical
    /// item" during import. Below this the default decision is "create new".
    pub association_accept: u8,
    /// Minimum score for accepting a source-supplied group label as one of
    /// the known group names without consulting the external classifier.
    pub group_recognition: u8,
    /// Minimum score (exclusive) for salvaging a non-verbatim classifier
    /// reply by re-matching it against the known group names.
    pub ai_reply_accept: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            association_accept: 80,
            group_recognition: 90,
            ai_reply_accept: 80,
        }
    }
}
