pub mod condition;
pub mod error;
pub mod host;
pub mod phase;
pub mod prompt;

pub use condition::{ConditionRecord, FieldValue, Schema, SchemaMode};
pub use error::{Error, Result};
pub use host::{AssetStore, FsAssets, Key, PresentationHost, TextStyle};
pub use phase::{PhaseKind, PhaseSpec, Visual};
pub use prompt::{Prompt, ResponseRecord, ResponseValue};
