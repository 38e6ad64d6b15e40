pub mod header;
pub mod session;

pub use session::{Decision, DecisionKind, MappingSession, NewItem, PendingItem, SessionState};
