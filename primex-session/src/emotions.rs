use primex_core::{Key, PresentationHost, Prompt, ResponseRecord, ResponseValue, Result};
use primex_sequence::collect;
use rand::Rng;

/// The four-dimensional mood self-report taken between trial blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emotions {
    pub happiness: f64,
    pub anger: f64,
    pub sadness: f64,
    pub disgust: f64,
}

impl Emotions {
    /// Presents all four scales at once, in randomized display order, and
    /// blocks until every one is answered and accepted.
    pub fn capture<R: Rng>(
        bounds: (u8, u8),
        host: &mut dyn PresentationHost,
        rng: &mut R,
    ) -> Result<Self> {
        let anchors = [
            ("happiness", "Gar nicht fröhlich", "Sehr fröhlich"),
            ("anger", "Gar nicht wütend", "Sehr wütend"),
            ("sadness", "Gar nicht traurig", "Sehr traurig"),
            ("disgust", "Gar nicht angewidert", "Sehr angewidert"),
        ];
        let prompts: Vec<Prompt> = anchors
            .iter()
            .map(|(name, low, high)| {
                Prompt::new(*name, format!("Wie {name}?"), (*low, *high), bounds.0, bounds.1)
            })
            .collect();

        let ratings = collect(
            "Bitte bewerten Sie ihre aktuellen Emotionen:",
            &prompts,
            true,
            Key::Space,
            host,
            rng,
        )?;

        Ok(Self {
            happiness: ratings["happiness"],
            anger: ratings["anger"],
            sadness: ratings["sadness"],
            disgust: ratings["disgust"],
        })
    }

    pub fn record(&self, order: usize) -> ResponseRecord {
        ResponseRecord::new(order)
            .with_response("happiness", ResponseValue::Number(self.happiness))
            .with_response("anger", ResponseValue::Number(self.anger))
            .with_response("sadness", ResponseValue::Number(self.sadness))
            .with_response("disgust", ResponseValue::Number(self.disgust))
    }
}
