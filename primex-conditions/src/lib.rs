pub mod sampler;
pub mod table;

pub use sampler::{sample, Trial, TrialCursor, TrialSet};
pub use table::ConditionTable;
