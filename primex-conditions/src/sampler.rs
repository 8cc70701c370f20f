use crate::table::ConditionTable;
use primex_core::{ConditionRecord, Error, Result, Schema};
use rand::Rng;
use rand::seq::SliceRandom;

/// One sampled condition record plus its position in the sampled order.
/// Immutable once sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub index: usize,
    pub record: ConditionRecord,
}

/// An ordered sample of trials, drawn without replacement. The order is
/// fixed once sampled; `reshuffle` implements the full-random discipline,
/// where each record is still visited exactly once per pass.
#[derive(Debug, Clone)]
pub struct TrialSet {
    trials: Vec<Trial>,
}

impl TrialSet {
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trial> {
        self.trials.iter()
    }

    pub fn cursor(&self) -> TrialCursor<'_> {
        TrialCursor {
            trials: &self.trials,
            next: 0,
        }
    }

    /// Re-randomizes the visiting order in place, keeping the same
    /// records, and renumbers the order indices.
    pub fn reshuffle<R: Rng>(&mut self, rng: &mut R) {
        self.trials.shuffle(rng);
        for (index, trial) in self.trials.iter_mut().enumerate() {
            trial.index = index;
        }
    }
}

impl<'a> IntoIterator for &'a TrialSet {
    type Item = &'a Trial;
    type IntoIter = std::slice::Iter<'a, Trial>;

    fn into_iter(self) -> Self::IntoIter {
        self.trials.iter()
    }
}

/// A stateless-beyond-position cursor over a trial set, decoupled from
/// the sampling itself.
#[derive(Debug)]
pub struct TrialCursor<'a> {
    trials: &'a [Trial],
    next: usize,
}

impl<'a> TrialCursor<'a> {
    pub fn remaining(&self) -> usize {
        self.trials.len() - self.next
    }

    /// Borrows up to `count` trials, advancing the cursor past them.
    pub fn take(&mut self, count: usize) -> &'a [Trial] {
        let start = self.next;
        let end = (start + count).min(self.trials.len());
        self.next = end;
        &self.trials[start..end]
    }
}

impl<'a> Iterator for TrialCursor<'a> {
    type Item = &'a Trial;

    fn next(&mut self) -> Option<&'a Trial> {
        let trial = self.trials.get(self.next)?;
        self.next += 1;
        Some(trial)
    }
}

/// Draws `count` records uniformly without replacement, validating the
/// table against `schema` first. The rng is injected so tests can pin
/// the draw.
pub fn sample<R: Rng>(
    table: &ConditionTable,
    count: usize,
    schema: &Schema,
    rng: &mut R,
) -> Result<TrialSet> {
    let Some(first) = table.records().first() else {
        return Err(Error::InsufficientData {
            requested: count,
            available: 0,
        });
    };
    if !schema.matches(first) {
        return Err(Error::SchemaMismatch {
            expected: schema.required().map(str::to_string).collect(),
            found: first.field_names().map(str::to_string).collect(),
        });
    }

    if count > table.len() {
        return Err(Error::InsufficientData {
            requested: count,
            available: table.len(),
        });
    }

    let picks = rand::seq::index::sample(rng, table.len(), count);
    let trials = picks
        .iter()
        .enumerate()
        .map(|(index, pick)| Trial {
            index,
            record: table.records()[pick].clone(),
        })
        .collect();

    Ok(TrialSet { trials })
}
