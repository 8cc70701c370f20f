use primex_core::{
    AssetStore, ConditionRecord, Error, Key, PhaseKind, PhaseSpec, PresentationHost, Prompt,
    Result, Schema, Visual,
};
use primex_sequence::{collect, present, SequenceOutcome};
use rand::Rng;
use std::path::{Path, PathBuf};

/// Per-phase durations of one masked presentation, in frames. The caller
/// supplies every duration; the sequencer has no timing constants of its
/// own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeTiming {
    pub forward: u32,
    pub prime: u32,
    pub backward: u32,
    pub neutral: u32,
}

/// The field set a prime condition table must provide.
pub fn prime_schema() -> Schema {
    Schema::exact(["forward", "prime", "backward", "neutral"])
}

/// One masked prime: four stimulus files, all verified to exist before
/// anything is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prime {
    forward: PathBuf,
    prime: PathBuf,
    backward: PathBuf,
    neutral: PathBuf,
}

impl Prime {
    /// Builds a prime from a sampled condition record, resolving the four
    /// paths against `base` and failing with `AssetMissing` for the first
    /// file that does not exist. Validation happens here, eagerly, never
    /// mid-render.
    pub fn from_record(
        record: &ConditionRecord,
        base: &Path,
        assets: &dyn AssetStore,
    ) -> Result<Self> {
        let mut resolve = |field: &str| -> Result<PathBuf> {
            let value = record.get(field).ok_or_else(|| Error::SchemaMismatch {
                expected: prime_schema().required().map(str::to_string).collect(),
                found: record.field_names().map(str::to_string).collect(),
            })?;
            let path = value.as_rel_path(base);
            if !assets.exists(&path) {
                return Err(Error::AssetMissing(path));
            }
            Ok(path)
        };

        Ok(Self {
            forward: resolve("forward")?,
            prime: resolve("prime")?,
            backward: resolve("backward")?,
            neutral: resolve("neutral")?,
        })
    }

    /// The presentation script: forward mask, prime, backward mask, then
    /// the neutral image, which the subject may cut short with the space
    /// key.
    pub fn phases(&self, timing: &PrimeTiming) -> Vec<PhaseSpec> {
        vec![
            PhaseSpec::timed(
                PhaseKind::ForwardMask,
                Visual::Image(self.forward.clone()),
                timing.forward,
            ),
            PhaseSpec::timed(
                PhaseKind::Prime,
                Visual::Image(self.prime.clone()),
                timing.prime,
            ),
            PhaseSpec::timed(
                PhaseKind::BackwardMask,
                Visual::Image(self.backward.clone()),
                timing.backward,
            ),
            PhaseSpec::interruptible(
                PhaseKind::Neutral,
                Visual::Image(self.neutral.clone()),
                timing.neutral,
            ),
        ]
    }

    /// Runs the full presentation and the attractiveness rating that
    /// follows it.
    pub fn show<R: Rng>(
        &self,
        timing: &PrimeTiming,
        bounds: (u8, u8),
        host: &mut dyn PresentationHost,
        rng: &mut R,
    ) -> Result<(f64, SequenceOutcome)> {
        let outcome = present(&self.phases(timing), Key::Space, host)?;
        let prompt = Prompt::new(
            "attractiveness",
            "Bitte bewerten Sie das Aussehen.",
            ("Absolut unsympathisch", "Absolut sympathisch"),
            bounds.0,
            bounds.1,
        );
        let ratings = collect(
            "Bewertung abgeben",
            std::slice::from_ref(&prompt),
            false,
            Key::Space,
            host,
            rng,
        )?;
        Ok((ratings["attractiveness"], outcome))
    }
}
