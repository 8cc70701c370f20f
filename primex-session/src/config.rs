use primex_core::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Everything the session script needs to know, loadable from a JSON file
/// next to the binary. Defaults reproduce the standard protocol: ten
/// dilemmas per block, seven masked primes before each, single-frame
/// masks, prime visible for one frame in the primed condition and zero in
/// the control condition.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub dilemmas_per_block: usize,
    pub primes_per_dilemma: usize,

    pub forward_frames: u32,
    pub primed_prime_frames: u32,
    pub unprimed_prime_frames: u32,
    pub backward_frames: u32,
    pub neutral_frames: u32,

    /// Bounds of the attractiveness and acceptability scales. Revisions
    /// disagree on the exact range, so it stays a parameter.
    pub rating_low: u8,
    pub rating_high: u8,

    pub prime_table: PathBuf,
    pub dilemma_tables: Vec<PathBuf>,
    pub shape_image: PathBuf,
    pub data_dir: PathBuf,

    pub dsr: DsrConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dilemmas_per_block: 10,
            primes_per_dilemma: 7,
            forward_frames: 1,
            primed_prime_frames: 1,
            unprimed_prime_frames: 0,
            backward_frames: 1,
            neutral_frames: 60,
            rating_low: 0,
            rating_high: 9,
            prime_table: PathBuf::from("stimuli/primes.csv"),
            dilemma_tables: vec![
                PathBuf::from("stimuli/dilemmata0.csv"),
                PathBuf::from("stimuli/dilemmata1.csv"),
            ],
            shape_image: PathBuf::from("stimuli/complex_shape.png"),
            data_dir: PathBuf::from("data"),
            dsr: DsrConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| Error::Table {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Parameters of the DS-R disgust questionnaire. The reversed items, the
/// two catch questions and their thresholds vary between revisions of the
/// scale, so none of them are hardcoded in the scoring.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DsrConfig {
    pub low: u8,
    pub high: u8,
    pub reversed_items: Vec<usize>,
    pub catch_agree_item: usize,
    pub catch_agree_min: f64,
    pub catch_reject_item: usize,
    pub catch_reject_max: f64,
}

impl Default for DsrConfig {
    fn default() -> Self {
        Self {
            low: 0,
            high: 4,
            reversed_items: vec![0, 5, 9],
            catch_agree_item: 11,
            catch_agree_min: 3.0,
            catch_reject_item: 15,
            catch_reject_max: 1.0,
        }
    }
}
