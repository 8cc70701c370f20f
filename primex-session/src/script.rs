use crate::config::SessionConfig;
use crate::dilemma::{dilemma_schema, Dilemma};
use crate::dsr::Dsr;
use crate::emotions::Emotions;
use crate::ledger::Ledger;
use crate::stimuli::{prime_schema, Prime, PrimeTiming};
use crate::subject::{Group, Subject};
use crate::trials::TrialLoop;
use primex_conditions::{sample, ConditionTable, TrialCursor};
use primex_core::{FsAssets, Key, PresentationHost, ResponseValue, Result, TextStyle};
use rand::Rng;

/// Every column a session ledger can carry. Prime rows, dilemma rows and
/// questionnaire rows each fill their own subset; the subject intake
/// fields are stamped into all of them.
pub const LEDGER_COLUMNS: [&str; 23] = [
    "subject",
    "group",
    "age",
    "gender",
    "order",
    "forward",
    "prime",
    "backward",
    "neutral",
    "attractiveness",
    "interrupted",
    "id",
    "primed",
    "rating",
    "happiness",
    "anger",
    "sadness",
    "disgust",
    "core_disgust",
    "animal_reminder_disgust",
    "contamination_disgust",
    "overall_disgust",
    "is_reliable",
];

/// Everything one session owns: built at session start, passed by
/// reference into each block, dropped at session end. Never a global.
pub struct SessionContext<R: Rng> {
    pub config: SessionConfig,
    pub subject: Subject,
    pub ledger: Ledger,
    pub rng: R,
}

impl<R: Rng> SessionContext<R> {
    pub fn new(config: SessionConfig, subject: Subject, ledger: Ledger, rng: R) -> Self {
        Self {
            config,
            subject,
            ledger,
            rng,
        }
    }
}

const WELCOME_TEXT: &str = "Herzlich willkommen!\n\
Im Folgenden wirst Du verschiedene Gesichter sehen. Wir bitten Dich, diese nach ihrer Sympathie zu bewerten.\n\n\
Anschließend werden Dir moralische Dilemmata präsentiert. Deine Aufgabe besteht darin, den Ausgang des Dilemmas zwischen absoluter Ablehnung und vollkommener Zustimmung auf Akzeptanz zu bewerten.\n\n\
Bitte drücke die Leertaste um fortzufahren.";

const GOODBYE_TEXT: &str = "Du hast es geschafft: Vielen Dank für Deine Teilnahme!\n\n\
Bitte warte ruhig auf die Experimentleitung.";

const PAUSE_TEXT: &str = "Eine kleine Pause...";

const SHAPE_TEXT: &str = "Bitte zeichne diese komplexe Form ab und drücke danach die Leertaste um fortzufahren:";

/// Runs the full fixed narrative: welcome, primed dilemma block, mood
/// check, de-priming, mood check, control dilemma block, mood check,
/// disgust questionnaire, goodbye. Which block carries visible primes
/// depends on the subject's group.
pub fn run_session<R: Rng>(
    ctx: &mut SessionContext<R>,
    host: &mut dyn PresentationHost,
) -> Result<()> {
    show_text(host, WELCOME_TEXT, 0.05)?;

    run_dilemma_block(ctx, host, 0)?;
    capture_emotions(ctx, host)?;

    run_depriming(ctx, host)?;
    capture_emotions(ctx, host)?;

    run_dilemma_block(ctx, host, 1)?;
    capture_emotions(ctx, host)?;

    let dsr = Dsr::capture(&ctx.config.dsr, host, &mut ctx.rng)?;
    let order = ctx.ledger.rows_written();
    ctx.ledger.append(&dsr.record(order))?;

    show_text(host, GOODBYE_TEXT, 0.08)?;
    Ok(())
}

/// One dilemma block: for each sampled dilemma, a run of masked primes
/// with attractiveness ratings, then the dilemma itself. The prime is
/// visible (one or more frames) only in the block the subject's group is
/// primed in.
pub fn run_dilemma_block<R: Rng>(
    ctx: &mut SessionContext<R>,
    host: &mut dyn PresentationHost,
    block: usize,
) -> Result<()> {
    let SessionContext {
        config,
        subject,
        ledger,
        rng,
    } = ctx;

    let primed = matches!(
        (block, subject.group()),
        (0, Group::A) | (1, Group::B)
    );
    let timing = PrimeTiming {
        forward: config.forward_frames,
        prime: if primed {
            config.primed_prime_frames
        } else {
            config.unprimed_prime_frames
        },
        backward: config.backward_frames,
        neutral: config.neutral_frames,
    };
    let bounds = (config.rating_low, config.rating_high);

    println!(
        "Block {block}: primed={primed}, {} dilemmata x {} primes",
        config.dilemmas_per_block, config.primes_per_dilemma
    );

    let dilemma_table = ConditionTable::load(&config.dilemma_tables[block])?;
    let prime_table = ConditionTable::load(&config.prime_table)?;
    let assets = FsAssets::new(prime_table.base_dir());

    let dilemmas = sample(&dilemma_table, config.dilemmas_per_block, &dilemma_schema(), rng)?;
    let primes = sample(
        &prime_table,
        config.dilemmas_per_block * config.primes_per_dilemma,
        &prime_schema(),
        rng,
    )?;

    let mut prime_cursor = primes.cursor();
    let mut trial_loop = TrialLoop::new(ledger);

    for dilemma_trial in dilemmas.iter() {
        trial_loop.run(TrialCursor::take(&mut prime_cursor, config.primes_per_dilemma), |trial| {
            let prime = Prime::from_record(&trial.record, assets.base(), &assets)?;
            let (rating, outcome) = prime.show(&timing, bounds, host, rng)?;
            Ok(vec![
                ("attractiveness".to_string(), ResponseValue::Number(rating)),
                (
                    "interrupted".to_string(),
                    ResponseValue::Flag(outcome.interrupted.is_some()),
                ),
            ])
        })?;

        trial_loop.run([dilemma_trial], |trial| {
            let dilemma = Dilemma::from_record(&trial.record)?;
            let rating = dilemma.show(bounds, host, rng)?;
            Ok(vec![
                ("primed".to_string(), ResponseValue::Flag(primed)),
                ("rating".to_string(), ResponseValue::Number(rating)),
            ])
        })?;
    }

    Ok(())
}

fn capture_emotions<R: Rng>(
    ctx: &mut SessionContext<R>,
    host: &mut dyn PresentationHost,
) -> Result<()> {
    let bounds = (ctx.config.rating_low, ctx.config.rating_high);
    let emotions = Emotions::capture(bounds, host, &mut ctx.rng)?;
    let order = ctx.ledger.rows_written();
    ctx.ledger.append(&emotions.record(order))
}

/// The de-priming interlude between the two blocks: a short pause screen,
/// then the complex-shape copy task, both dismissed with the space key.
fn run_depriming<R: Rng>(
    ctx: &mut SessionContext<R>,
    host: &mut dyn PresentationHost,
) -> Result<()> {
    show_text(host, PAUSE_TEXT, 0.05)?;

    let shape = ctx.config.shape_image.clone();
    loop {
        host.draw_text(SHAPE_TEXT, TextStyle::at((0.0, 0.7), 0.08))?;
        host.draw_image(&shape)?;
        host.flip()?;
        if !host.poll_keys(&[Key::Space]).is_empty() {
            break;
        }
    }
    host.clear_events();
    Ok(())
}

/// Draws `text` centered every frame until the space key is pressed.
pub fn show_text(host: &mut dyn PresentationHost, text: &str, height: f32) -> Result<()> {
    loop {
        host.draw_text(text, TextStyle::centered(height))?;
        host.flip()?;
        if !host.poll_keys(&[Key::Space]).is_empty() {
            break;
        }
    }
    host.clear_events();
    Ok(())
}
