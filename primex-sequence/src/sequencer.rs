use primex_core::{Key, PhaseKind, PhaseSpec, PresentationHost, Result};

/// What the timed loop actually did: how many flips it performed in
/// total, and which phase, if any, was cut short by the interrupt key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceOutcome {
    pub flips: u64,
    pub interrupted: Option<PhaseKind>,
}

/// Renders `phases` in declared order, each for exactly its frame count,
/// one host flip per loop iteration.
///
/// Before the timed loop every phase's visual is drawn once, so the first
/// timed frame does not pay first-draw latency; the warm-up consumes no
/// flip. An interruptible phase polls `interrupt_key` once per frame and
/// ends the instant the key is observed. Pending input is discarded after
/// the last phase, before any rating capture can see it.
pub fn present(
    phases: &[PhaseSpec],
    interrupt_key: Key,
    host: &mut dyn PresentationHost,
) -> Result<SequenceOutcome> {
    for phase in phases {
        phase.visual.draw(host)?;
    }

    let mut flips = 0u64;
    let mut interrupted = None;
    for phase in phases {
        for _ in 0..phase.frames {
            phase.visual.draw(host)?;
            host.flip()?;
            flips += 1;
            if phase.interruptible && !host.poll_keys(&[interrupt_key]).is_empty() {
                interrupted = Some(phase.kind);
                break;
            }
        }
    }

    host.clear_events();
    Ok(SequenceOutcome { flips, interrupted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host_stub::{DrawCall, StubHost};
    use pretty_assertions::assert_eq;
    use primex_core::Visual;
    use std::path::PathBuf;

    fn image(name: &str) -> Visual {
        Visual::Image(PathBuf::from(name))
    }

    fn masked_prime(frames: [u32; 4]) -> Vec<PhaseSpec> {
        vec![
            PhaseSpec::timed(PhaseKind::ForwardMask, image("fwd.png"), frames[0]),
            PhaseSpec::timed(PhaseKind::Prime, image("prime.png"), frames[1]),
            PhaseSpec::timed(PhaseKind::BackwardMask, image("bwd.png"), frames[2]),
            PhaseSpec::interruptible(PhaseKind::Neutral, image("neutral.png"), frames[3]),
        ]
    }

    #[test]
    fn flip_count_is_the_sum_of_phase_durations() {
        let mut host = StubHost::new();
        let outcome = present(&masked_prime([2, 1, 2, 3]), Key::Space, &mut host).unwrap();

        assert_eq!(outcome.flips, 8);
        assert_eq!(outcome.interrupted, None);
        assert_eq!(host.flips, 8);
    }

    #[test]
    fn phases_render_in_declared_order() {
        let mut host = StubHost::new();
        present(&masked_prime([1, 1, 1, 1]), Key::Space, &mut host).unwrap();

        let timed: Vec<&DrawCall> = host.draws.iter().skip(4).collect();
        let names: Vec<&str> = timed
            .iter()
            .map(|call| match call {
                DrawCall::Image(path) => path.to_str().unwrap(),
                DrawCall::Text(text) => text.as_str(),
            })
            .collect();
        assert_eq!(names, ["fwd.png", "prime.png", "bwd.png", "neutral.png"]);
    }

    #[test]
    fn warm_up_draws_every_phase_before_the_first_flip() {
        let mut host = StubHost::new();
        present(&masked_prime([1, 1, 1, 1]), Key::Space, &mut host).unwrap();

        // The first four draws are the warm-up pass over every phase, and
        // only the timed loop flips: 4 frames, 4 flips.
        let warmup: Vec<&str> = host.draws[..4]
            .iter()
            .map(|call| match call {
                DrawCall::Image(path) => path.to_str().unwrap(),
                DrawCall::Text(text) => text.as_str(),
            })
            .collect();
        assert_eq!(warmup, ["fwd.png", "prime.png", "bwd.png", "neutral.png"]);
        assert_eq!(host.draws_before_first_flip, 5); // warm-up + first timed draw
        assert_eq!(host.flips, 4);
    }

    #[test]
    fn interrupt_cuts_the_phase_after_exactly_k_flips() {
        let mut host = StubHost::new();
        // Space observed on the poll after the 6th flip: forward(2) +
        // prime(1) + backward(2) have run, neutral is on its first frame.
        host.press_at_flip(6, Key::Space);
        let outcome = present(&masked_prime([2, 1, 2, 10]), Key::Space, &mut host).unwrap();

        assert_eq!(outcome.flips, 6);
        assert_eq!(outcome.interrupted, Some(PhaseKind::Neutral));
    }

    #[test]
    fn interrupt_key_is_ignored_during_non_interruptible_phases() {
        let mut host = StubHost::new();
        host.press_at_flip(1, Key::Space);
        let outcome = present(&masked_prime([2, 2, 2, 0]), Key::Space, &mut host).unwrap();

        // No polls happen outside the neutral phase, so nothing is cut.
        assert_eq!(outcome.flips, 6);
        assert_eq!(outcome.interrupted, None);
        assert_eq!(host.polls, 0);
    }

    #[test]
    fn pending_events_are_cleared_after_the_last_phase() {
        let mut host = StubHost::new();
        present(&masked_prime([1, 1, 1, 0]), Key::Space, &mut host).unwrap();
        assert_eq!(host.clears, 1);
    }

    #[test]
    fn zero_frame_phases_are_skipped_without_a_flip() {
        let mut host = StubHost::new();
        let outcome = present(&masked_prime([1, 0, 1, 0]), Key::Space, &mut host).unwrap();
        assert_eq!(outcome.flips, 2);
    }
}
