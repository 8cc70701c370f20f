use crate::config::DsrConfig;
use primex_core::{Error, Key, PresentationHost, Prompt, ResponseRecord, ResponseValue, Result};
use primex_sequence::{collect, MAX_SIMULTANEOUS_PROMPTS};
use rand::Rng;

/// The DS-R disgust questionnaire (Haidt, McCauley & Rozin, 1994,
/// modified by Olatunji et al. 2007): 27 statements, two of them catch
/// questions that only feed the reliability flag.
pub const DSR_ITEMS: usize = 27;

/// Items up to this index use agreement anchors, the rest disgust
/// anchors.
const AGREEMENT_ITEMS: usize = 14;

const CORE_ITEMS: [usize; 12] = [0, 2, 5, 7, 10, 12, 14, 16, 19, 21, 24, 26];
const ANIMAL_REMINDER_ITEMS: [usize; 8] = [1, 4, 6, 9, 13, 18, 20, 23];
const CONTAMINATION_ITEMS: [usize; 5] = [3, 8, 17, 22, 25];

const STATEMENTS: [&str; DSR_ITEMS] = [
    "Ich wäre unter bestimmten Umständen dazu bereit Affenfleisch zu probieren.",
    "Es würde mich stören in einem Naturkundekurs eine in einem Glas preservierte, menschliche Hand zu sehen.",
    "Es macht mir etwas aus zu hören wie sich jemand mit Schleim im Hals räuspert.",
    "Ich lasse nie einen Teil meines Körpers den Toilettensitz einer öffentlichen Toilette berühren.",
    "Ich würde mich sehr darum bemühen es zu vermeiden durch einen Friedhof zu gehen.",
    "Eine Kakerlake bei jemanden Zuhause zu sehen stört mich nicht.",
    "Es würde mich ungemein stören, eine Leiche zu berühren.",
    "Wenn ich jemanden sich übergeben sehe, wird mir schlecht.",
    "Ich würde wahrscheinlich nicht zu meinem Lieblingsrestaurant gehen, wenn ich herausfände, dass der Koch eine Erkältung hat.",
    "Es würde mich überhaupt nicht stören, zuzusehen wie eine Person mit einem Glasauge das Auge aus der Fassung nimmt.",
    "Es würde mich stören eine Ratte über meinen Weg im Park rennen zu sehen.",
    "Ich würde eher ein Stückchen Obst, als ein Stückchen Papier essen.",
    "Selbst wenn ich hungrig wäre, würde ich nicht einen Teller meiner Lieblingssuppe essen, sollte diese zuvor mit einer gebrauchten, jedoch gründlich gereinigten Fliegenklatsche umgerührt worden sein.",
    "Es würde mir etwas ausmachen, in einem netten Hotelzimmer zu schlafen, wenn ich wüsste, dass ein Mann eine Nacht vorher in diesem Zimmer an einem Herzanfall gestorben ist.",
    "Du siehst Maden auf einem Stück Fleisch, das in einem Außenabfall-Eimer liegt.",
    "Du siehst eine Person, die einen Apfel mit Messer und Gabel isst.",
    "Während du durch einen Tunnel unter einer Eisenbahn-Spur hindurchgehst, riechst du Urin.",
    "Du nimmst einen Schluck von einem Getränk, und realisierst erst danach, dass du von einem Glas getrunken hast, aus dem ein Bekannter von dir schon getrunken hatte.",
    "Die Lieblingskatze deines Freunds stirbt, und du musst die Leiche mit deinen bloßen Händen aufsammeln.",
    "Du siehst, dass jemand Ketchup auf Vanille-Eiscreme verteilt, und es isst.",
    "Nach einem Unfall siehst du einen Mann mit entblößten Gedärmen.",
    "Du findest heraus, dass ein Freund von dir seine Unterwäsche nur einmal in der Woche wechselt.",
    "Ein Freund bietet dir ein Stück Schokolade an, das wie Hundekacke geformt ist.",
    "Du berührst zufällig die Asche einer verbrannten Leiche.",
    "Du willst gerade von einem Glas Milch trinken, als du riechst, dass die Milch verdorben ist.",
    "Als Teil des Sexualunterrichtes wirst du gebeten, ein neues, ungeschmiertes Kondom mit dem Mund aufzublasen.",
    "Du gehst barfuß auf Beton spazieren und trittst auf einen Regenwurm.",
];

/// Scored questionnaire result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dsr {
    pub reliable: bool,
    pub core: f64,
    pub animal_reminder: f64,
    pub contamination: f64,
    pub overall: f64,
}

impl Dsr {
    /// Scores a complete 27-item answer vector. Reversed items are
    /// inverted against the scale's high bound first; the two catch items
    /// feed only the reliability flag and are excluded from the overall
    /// mean.
    pub fn score(ratings: &[f64], config: &DsrConfig) -> Result<Self> {
        if ratings.len() != DSR_ITEMS {
            return Err(Error::InvalidRatings(format!(
                "expected {DSR_ITEMS} ratings, got {}",
                ratings.len()
            )));
        }
        let low = f64::from(config.low);
        let high = f64::from(config.high);
        if let Some(bad) = ratings.iter().find(|r| **r < low || **r > high) {
            return Err(Error::InvalidRatings(format!(
                "rating {bad} outside {low}..{high}"
            )));
        }

        let mut r = ratings.to_vec();
        for &item in &config.reversed_items {
            r[item] = high - r[item];
        }

        let reliable = r[config.catch_agree_item] >= config.catch_agree_min
            && r[config.catch_reject_item] <= config.catch_reject_max;

        let mean = |items: &[usize]| -> f64 {
            items.iter().map(|&i| r[i]).sum::<f64>() / items.len() as f64
        };

        let scored = DSR_ITEMS - 2;
        let overall = (r.iter().sum::<f64>()
            - r[config.catch_agree_item]
            - r[config.catch_reject_item])
            / scored as f64;

        Ok(Self {
            reliable,
            core: mean(&CORE_ITEMS),
            animal_reminder: mean(&ANIMAL_REMINDER_ITEMS),
            contamination: mean(&CONTAMINATION_ITEMS),
            overall,
        })
    }

    /// Presents all 27 statements in screenfuls of at most four scales
    /// and scores the answers.
    pub fn capture<R: Rng>(
        config: &DsrConfig,
        host: &mut dyn PresentationHost,
        rng: &mut R,
    ) -> Result<Self> {
        let mut ratings = vec![0.0; DSR_ITEMS];

        // The anchor wording switches at AGREEMENT_ITEMS, so chunks never
        // straddle the boundary.
        let regimes = [
            (0, AGREEMENT_ITEMS, ("Ich stimme ganz und gar nicht zu", "Ich stimme voll und ganz zu")),
            (AGREEMENT_ITEMS, DSR_ITEMS, ("Überhaupt nicht ekelig", "Extrem ekelig")),
        ];

        for (start, end, anchors) in regimes {
            let mut item = start;
            while item < end {
                let chunk_end = (item + MAX_SIMULTANEOUS_PROMPTS).min(end);
                let prompts: Vec<Prompt> = (item..chunk_end)
                    .map(|i| {
                        Prompt::new(
                            format!("q{i:02}"),
                            STATEMENTS[i],
                            anchors,
                            config.low,
                            config.high,
                        )
                    })
                    .collect();

                let answers = collect(
                    "Bitte bewerten Sie folgende Aussagen:",
                    &prompts,
                    false,
                    Key::Space,
                    host,
                    rng,
                )?;
                for i in item..chunk_end {
                    ratings[i] = answers[&format!("q{i:02}")];
                }
                item = chunk_end;
            }
        }

        Self::score(&ratings, config)
    }

    pub fn record(&self, order: usize) -> ResponseRecord {
        ResponseRecord::new(order)
            .with_response("core_disgust", ResponseValue::Number(self.core))
            .with_response(
                "animal_reminder_disgust",
                ResponseValue::Number(self.animal_reminder),
            )
            .with_response(
                "contamination_disgust",
                ResponseValue::Number(self.contamination),
            )
            .with_response("overall_disgust", ResponseValue::Number(self.overall))
            .with_response("is_reliable", ResponseValue::Flag(self.reliable))
    }
}
