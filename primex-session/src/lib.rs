pub mod config;
pub mod dilemma;
pub mod dsr;
pub mod emotions;
pub mod ledger;
pub mod script;
pub mod stimuli;
pub mod subject;
pub mod trials;

pub use config::{DsrConfig, SessionConfig};
pub use dilemma::{dilemma_schema, Dilemma};
pub use dsr::Dsr;
pub use emotions::Emotions;
pub use ledger::Ledger;
pub use script::{run_session, SessionContext, LEDGER_COLUMNS};
pub use stimuli::{prime_schema, Prime, PrimeTiming};
pub use subject::{Gender, Group, Subject};
pub use trials::TrialLoop;

#[cfg(test)]
pub(crate) mod host_stub;
