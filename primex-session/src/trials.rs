use crate::ledger::Ledger;
use primex_conditions::Trial;
use primex_core::{ResponseRecord, ResponseValue, Result};

/// Drives a set of sampled trials and guarantees the recording contract:
/// exactly one ledger row per trial, in iteration order, with the trial's
/// own fields carried into the row. The first error aborts the loop
/// before the failing trial writes anything.
pub struct TrialLoop<'a> {
    ledger: &'a mut Ledger,
}

impl<'a> TrialLoop<'a> {
    pub fn new(ledger: &'a mut Ledger) -> Self {
        Self { ledger }
    }

    /// Runs `run_one` for each trial and appends one ResponseRecord per
    /// completed trial. `run_one` must validate the trial's assets before
    /// touching the display; the loop itself never renders.
    pub fn run<'t, I, F>(&mut self, trials: I, mut run_one: F) -> Result<usize>
    where
        I: IntoIterator<Item = &'t Trial>,
        F: FnMut(&'t Trial) -> Result<Vec<(String, ResponseValue)>>,
    {
        let mut completed = 0;
        for trial in trials {
            let responses = run_one(trial)?;

            let mut record = ResponseRecord::new(trial.index);
            for (name, value) in trial.record.fields() {
                record = record.with_info(name, value.as_text());
            }
            for (name, value) in responses {
                record = record.with_response(name, value);
            }

            self.ledger.append(&record)?;
            completed += 1;
        }
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host_stub::ScriptedHost;
    use crate::stimuli::{prime_schema, Prime, PrimeTiming};
    use pretty_assertions::assert_eq;
    use primex_conditions::{sample, ConditionTable};
    use primex_core::{Error, FsAssets};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::Path;

    fn write_prime_fixture(dir: &Path, records: usize, skip_asset: Option<usize>) -> ConditionTable {
        let mut csv = String::from("forward,prime,backward,neutral\n");
        for i in 0..records {
            for kind in ["f", "p", "b", "n"] {
                let name = format!("{kind}{i}.png");
                if skip_asset != Some(i) || kind != "p" {
                    std::fs::write(dir.join(&name), b"png").unwrap();
                }
            }
            csv.push_str(&format!("f{i}.png,p{i}.png,b{i}.png,n{i}.png\n"));
        }
        let table_path = dir.join("primes.csv");
        std::fs::write(&table_path, csv).unwrap();
        ConditionTable::load(&table_path).unwrap()
    }

    fn ledger_in(dir: &Path) -> Ledger {
        Ledger::create(
            &dir.join("out.csv"),
            &["order", "prime", "attractiveness", "interrupted"],
        )
        .unwrap()
    }

    const TIMING: PrimeTiming = PrimeTiming {
        forward: 1,
        prime: 1,
        backward: 1,
        neutral: 0,
    };

    #[test]
    fn ten_trials_produce_ten_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let table = write_prime_fixture(dir.path(), 20, None);
        let mut rng = StdRng::seed_from_u64(9);
        let set = sample(&table, 10, &prime_schema(), &mut rng).unwrap();

        let assets = FsAssets::new(table.base_dir());
        // Answers every rating instantly with 7 and accepts.
        let mut host = ScriptedHost::answering(7);
        let mut ledger = ledger_in(dir.path());

        let completed = TrialLoop::new(&mut ledger)
            .run(&set, |trial| {
                let prime = Prime::from_record(&trial.record, assets.base(), &assets)?;
                let (rating, outcome) = prime.show(&TIMING, (0, 9), &mut host, &mut rng)?;
                Ok(vec![
                    (
                        "attractiveness".to_string(),
                        ResponseValue::Number(rating),
                    ),
                    (
                        "interrupted".to_string(),
                        ResponseValue::Flag(outcome.interrupted.is_some()),
                    ),
                ])
            })
            .unwrap();

        assert_eq!(completed, 10);
        assert_eq!(ledger.rows_written(), 10);

        let contents = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
        let rows: Vec<&str> = contents.lines().skip(1).collect();
        assert_eq!(rows.len(), 10);
        for (i, row) in rows.iter().enumerate() {
            let cells: Vec<&str> = row.split(',').collect();
            assert_eq!(cells[0], i.to_string());
            assert!(cells[1].ends_with(".png"));
            assert_eq!(cells[2], "7");
            assert_eq!(cells[3], "false");
        }
        // 3 timed flips per presentation plus 1 rating frame, 10 trials.
        assert_eq!(host.flips, 40);
    }

    #[test]
    fn missing_asset_aborts_before_any_flip() {
        let dir = tempfile::tempdir().unwrap();
        let table = write_prime_fixture(dir.path(), 3, Some(0));
        let mut rng = StdRng::seed_from_u64(1);
        let set = sample(&table, 3, &prime_schema(), &mut rng).unwrap();

        let assets = FsAssets::new(table.base_dir());
        let mut host = ScriptedHost::answering(7);
        let mut ledger = ledger_in(dir.path());

        // Force the broken record to be visited first.
        let mut ordered: Vec<&primex_conditions::Trial> = set.iter().collect();
        ordered.sort_by_key(|t| t.record.get("prime").unwrap().as_text().to_string());

        let result = TrialLoop::new(&mut ledger).run(ordered, |trial| {
            let prime = Prime::from_record(&trial.record, assets.base(), &assets)?;
            let (rating, _) = prime.show(&TIMING, (0, 9), &mut host, &mut rng)?;
            Ok(vec![(
                "attractiveness".to_string(),
                ResponseValue::Number(rating),
            )])
        });

        assert!(matches!(result, Err(Error::AssetMissing(_))));
        assert_eq!(host.flips, 0);
        assert_eq!(ledger.rows_written(), 0);
    }
}
