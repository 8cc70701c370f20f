use primex_core::{Error, Key, PresentationHost, Prompt, Result, TextStyle};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// Hard cap on concurrently visible scales; more is a caller bug, not a
/// runtime condition.
pub const MAX_SIMULTANEOUS_PROMPTS: usize = 4;

const TITLE_STYLE: TextStyle = TextStyle {
    pos: (0.0, 0.75),
    height: 0.075,
};
const FIRST_PROMPT_Y: f32 = 0.45;
const PROMPT_SPACING: f32 = 0.35;
const PROMPT_HEIGHT: f32 = 0.05;

/// Blocks until every prompt has an answer and the last displayed prompt
/// has been explicitly accepted, then returns the full name → rating
/// mapping. All-or-nothing: there is no partial result.
///
/// Value entry goes to the first unanswered prompt in display order; a
/// digit outside that prompt's bounds is ignored. The accept key only
/// latches once the last displayed prompt has a value, so an accept
/// arriving early can never terminate the capture.
pub fn collect<R: Rng>(
    title: &str,
    prompts: &[Prompt],
    randomize_order: bool,
    accept_key: Key,
    host: &mut dyn PresentationHost,
    rng: &mut R,
) -> Result<BTreeMap<String, f64>> {
    if prompts.len() > MAX_SIMULTANEOUS_PROMPTS {
        return Err(Error::TooManyPrompts {
            got: prompts.len(),
            limit: MAX_SIMULTANEOUS_PROMPTS,
        });
    }
    if prompts.is_empty() {
        return Ok(BTreeMap::new());
    }

    // Display order is shuffled at most once; result keys are unaffected.
    let mut order: Vec<usize> = (0..prompts.len()).collect();
    if randomize_order {
        order.shuffle(rng);
    }
    let last_displayed = *order.last().expect("prompts is non-empty");

    let mut watched: Vec<Key> = (0..=9).map(Key::Digit).collect();
    watched.push(accept_key);

    let mut values: Vec<Option<u8>> = vec![None; prompts.len()];
    let mut last_accepted = false;

    loop {
        host.draw_text(title, TITLE_STYLE)?;
        for (slot, &index) in order.iter().enumerate() {
            let prompt = &prompts[index];
            let marker = match values[index] {
                Some(value) => value.to_string(),
                None => "-".to_string(),
            };
            let line = format!(
                "{}  ({} {} .. {} {})  [{}]",
                prompt.question, prompt.anchors.0, prompt.low, prompt.high, prompt.anchors.1, marker,
            );
            let y = FIRST_PROMPT_Y - slot as f32 * PROMPT_SPACING;
            host.draw_text(&line, TextStyle::at((0.0, y), PROMPT_HEIGHT))?;
        }
        host.flip()?;

        for key in host.poll_keys(&watched) {
            if key == accept_key {
                if values[last_displayed].is_some() {
                    last_accepted = true;
                }
            } else if let Key::Digit(digit) = key {
                let focused = order.iter().copied().find(|&i| values[i].is_none());
                if let Some(index) = focused {
                    if prompts[index].accepts(digit) {
                        values[index] = Some(digit);
                    }
                }
            }
        }

        if capture_complete(&values, last_accepted) {
            break;
        }
    }

    Ok(prompts
        .iter()
        .zip(&values)
        .map(|(prompt, value)| {
            let value = value.expect("capture only completes with all values set");
            (prompt.name.clone(), f64::from(value))
        })
        .collect())
}

/// The loop's termination predicate: every prompt answered and the last
/// displayed prompt explicitly accepted.
fn capture_complete(values: &[Option<u8>], last_accepted: bool) -> bool {
    last_accepted && values.iter().all(Option::is_some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host_stub::StubHost;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn prompt(name: &str, low: u8, high: u8) -> Prompt {
        Prompt::new(name, format!("how {name}?"), ("not at all", "very"), low, high)
    }

    #[test]
    fn five_prompts_fail_before_any_rendering() {
        let prompts: Vec<Prompt> = (0..5).map(|i| prompt(&format!("p{i}"), 0, 9)).collect();
        let mut host = StubHost::new();
        let mut rng = StdRng::seed_from_u64(0);

        let result = collect("title", &prompts, false, Key::Space, &mut host, &mut rng);

        assert!(matches!(
            result,
            Err(Error::TooManyPrompts { got: 5, limit: 4 })
        ));
        assert!(host.draws.is_empty());
        assert_eq!(host.flips, 0);
    }

    #[test]
    fn termination_predicate() {
        assert!(!capture_complete(&[None], false));
        assert!(!capture_complete(&[None], true));
        assert!(!capture_complete(&[Some(3)], false));
        assert!(capture_complete(&[Some(3)], true));
        assert!(!capture_complete(&[Some(3), None], true));
    }

    #[test]
    fn accept_before_a_value_does_not_terminate() {
        let prompts = [prompt("rating", 0, 9)];
        let mut host = StubHost::new();
        host.press_at_flip(1, Key::Space); // accept with no value: ignored
        host.press_at_flip(2, Key::Digit(7));
        host.press_at_flip(3, Key::Space);
        let mut rng = StdRng::seed_from_u64(0);

        let result = collect("rate", &prompts, false, Key::Space, &mut host, &mut rng).unwrap();

        assert_eq!(host.flips, 3);
        assert_eq!(result["rating"], 7.0);
    }

    #[test]
    fn earlier_prompts_need_values_before_accept_can_end_the_loop() {
        let prompts = [prompt("a", 0, 9), prompt("b", 0, 9), prompt("c", 0, 9)];
        let mut host = StubHost::new();
        // One digit lands per frame; accept is pressed every frame but only
        // the one after the final value can terminate.
        host.always_pressed = vec![Key::Digit(4), Key::Space];
        let mut rng = StdRng::seed_from_u64(0);

        let result = collect("rate", &prompts, false, Key::Space, &mut host, &mut rng).unwrap();

        assert_eq!(host.flips, 3);
        assert_eq!(result["a"], 4.0);
        assert_eq!(result["b"], 4.0);
        assert_eq!(result["c"], 4.0);
    }

    #[test]
    fn out_of_bounds_digits_are_ignored() {
        let prompts = [prompt("rating", 1, 4)];
        let mut host = StubHost::new();
        host.press_at_flip(1, Key::Digit(9)); // outside 1..=4
        host.press_at_flip(2, Key::Digit(3));
        host.press_at_flip(3, Key::Space);
        let mut rng = StdRng::seed_from_u64(0);

        let result = collect("rate", &prompts, false, Key::Space, &mut host, &mut rng).unwrap();

        assert_eq!(host.flips, 3);
        assert_eq!(result["rating"], 3.0);
    }

    #[test]
    fn shuffled_display_order_does_not_affect_result_keys() {
        // Disjoint bounds let each digit land only on its own prompt, so
        // the assertion holds whichever display order the seed produces.
        let prompts = [prompt("small", 0, 3), prompt("big", 5, 9)];
        let mut host = StubHost::new();
        host.always_pressed = vec![Key::Digit(2), Key::Digit(7), Key::Space];
        let mut rng = StdRng::seed_from_u64(42);

        let result = collect("rate", &prompts, true, Key::Space, &mut host, &mut rng).unwrap();

        assert_eq!(result["small"], 2.0);
        assert_eq!(result["big"], 7.0);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn all_prompts_are_redrawn_every_frame() {
        let prompts = [prompt("a", 0, 9), prompt("b", 0, 9)];
        let mut host = StubHost::new();
        host.press_at_flip(2, Key::Digit(1));
        host.press_at_flip(3, Key::Digit(2));
        host.press_at_flip(4, Key::Space);
        let mut rng = StdRng::seed_from_u64(0);

        collect("rate", &prompts, false, Key::Space, &mut host, &mut rng).unwrap();

        // Title + both prompts on each of the 4 frames.
        assert_eq!(host.flips, 4);
        assert_eq!(host.draws.len(), 3 * 4);
    }
}
