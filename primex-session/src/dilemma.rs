use primex_core::{ConditionRecord, Error, Key, PresentationHost, Prompt, Result, Schema};
use primex_sequence::collect;
use rand::Rng;

/// The field set a dilemma condition table must provide. Extra columns
/// (categories, translations) are tolerated.
pub fn dilemma_schema() -> Schema {
    Schema::superset(["id", "text"])
}

/// One moral vignette the subject rates for acceptability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dilemma {
    pub id: String,
    pub text: String,
}

impl Dilemma {
    pub fn from_record(record: &ConditionRecord) -> Result<Self> {
        let field = |name: &str| -> Result<String> {
            record
                .get(name)
                .map(|value| value.as_text().to_string())
                .ok_or_else(|| Error::SchemaMismatch {
                    expected: dilemma_schema().required().map(str::to_string).collect(),
                    found: record.field_names().map(str::to_string).collect(),
                })
        };
        Ok(Self {
            id: field("id")?,
            text: field("text")?,
        })
    }

    /// Shows the vignette text and blocks on a single acceptability
    /// rating.
    pub fn show<R: Rng>(
        &self,
        bounds: (u8, u8),
        host: &mut dyn PresentationHost,
        rng: &mut R,
    ) -> Result<f64> {
        let prompt = Prompt::new(
            "rating",
            "Bitte bewerten Sie die Entscheidung",
            ("Absolut unakzeptabel", "Absolut akzeptabel"),
            bounds.0,
            bounds.1,
        );
        let ratings = collect(
            &self.text,
            std::slice::from_ref(&prompt),
            false,
            Key::Space,
            host,
            rng,
        )?;
        Ok(ratings["rating"])
    }
}
