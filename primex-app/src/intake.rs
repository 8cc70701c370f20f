use anyhow::Result;
use primex_session::{Gender, Group, Subject};
use rand::Rng;
use std::io::Write;

/// Gathers the subject parameters from the terminal before any window
/// opens. Returns `None` for a cancelled or invalid intake; the session
/// then exits without creating a ledger.
pub fn subject_from_terminal<R: Rng>(rng: &mut R) -> Result<Option<Subject>> {
    println!("\nHerzlich willkommen zu unserem Experiment!");
    println!("Bitte starte es erst, wenn du dazu aufgefordert wirst.\n");

    let id = Subject::generate_id(rng);
    println!("Anonyme ID: {id}");

    let group = match ask("Gruppe [A/B]: ")?.trim().to_uppercase().as_str() {
        "A" => Group::A,
        "B" => Group::B,
        _ => return Ok(None),
    };

    let age: u32 = match ask("Alter: ")?.trim().parse() {
        Ok(age) => age,
        Err(_) => return Ok(None),
    };

    let gender = match ask("Geschlecht [w/m]: ")?.trim().to_lowercase().as_str() {
        "w" => Gender::Female,
        "m" => Gender::Male,
        _ => return Ok(None),
    };

    Ok(Subject::new(id, group, age, gender))
}

fn ask(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}
