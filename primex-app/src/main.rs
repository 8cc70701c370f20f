mod host;
mod intake;

use anyhow::Result;
use host::WinitHost;
use primex_session::{run_session, Ledger, SessionConfig, SessionContext, LEDGER_COLUMNS};
use std::path::Path;

const CONFIG_PATH: &str = "config.json";
const FONT_PATH: &str = "assets/DejaVuSans.ttf";

fn main() -> Result<()> {
    println!("=== PRIMING MEETS DILEMMA ===");
    println!("Platform: {}", std::env::consts::OS);

    let config = if Path::new(CONFIG_PATH).exists() {
        SessionConfig::load(Path::new(CONFIG_PATH))?
    } else {
        SessionConfig::default()
    };

    let mut rng = rand::rng();
    let Some(subject) = intake::subject_from_terminal(&mut rng)? else {
        // Cancelled or under-age intake: leave quietly, no ledger.
        println!("Intake abgebrochen. Es wurden keine Daten gespeichert.");
        return Ok(());
    };

    let ledger_path = config.data_dir.join(format!("{}.csv", subject.id()));
    let ledger = Ledger::create(&ledger_path, &LEDGER_COLUMNS)?.with_constants(subject.info());
    println!("Ledger: {}", ledger_path.display());

    let mut host = WinitHost::new(Path::new(FONT_PATH))?;
    let mut ctx = SessionContext::new(config, subject, ledger, rng);

    run_session(&mut ctx, &mut host)?;

    host.report_frame_stats();
    println!(
        "\nSession complete: {} rows written to {}",
        ctx.ledger.rows_written(),
        ctx.ledger.path().display()
    );
    Ok(())
}
