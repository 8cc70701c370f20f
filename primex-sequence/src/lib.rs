pub mod capture;
pub mod sequencer;

pub use capture::{collect, MAX_SIMULTANEOUS_PROMPTS};
pub use sequencer::{present, SequenceOutcome};

#[cfg(test)]
pub(crate) mod host_stub;
