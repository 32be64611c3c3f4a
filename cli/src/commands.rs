use std::path::Path;

use sever_core::{
    Encounter, EncounterSignal, ProjectilePool, SignalHandler, load_encounter_file,
    load_encounters_from_dir,
};

use crate::script::ScriptedPlayer;

/// Prints every signal as it is dispatched.
struct PrintHandler;

impl SignalHandler for PrintHandler {
    fn handle_signal(&mut self, signal: &EncounterSignal) {
        println!("  signal: {signal:?}");
    }

    fn on_encounter_start(&mut self) {
        println!("encounter started");
    }

    fn on_encounter_end(&mut self) {
        println!("encounter concluded");
    }
}

/// Load a definition and run a scripted fight to conclusion.
pub fn simulate(
    path: &str,
    seed: u64,
    dt: f32,
    dps: f32,
    fail_qtes: bool,
    max_secs: f32,
) -> Result<(), String> {
    tracing::info!(path, seed, dt, dps, "loading encounter definition");
    let file = load_encounter_file(Path::new(path)).map_err(|e| e.to_string())?;
    println!(
        "simulating `{}` (threads: {}, max health: {})",
        file.encounter.id, file.encounter.thread_count, file.encounter.max_health
    );

    let mut encounter = Encounter::new(file, ProjectilePool::new(), seed);
    let mut player = ScriptedPlayer::new(dps, !fail_qtes);
    encounter.set_player(Some(player.target()));
    encounter.add_handler(Box::new(PrintHandler));

    let mut elapsed = 0.0;
    while !encounter.is_concluded() && elapsed < max_secs {
        player.act(&mut encounter, dt);
        encounter.tick(dt);
        elapsed += dt;
    }

    if !encounter.is_concluded() {
        tracing::warn!(max_secs, "fight did not conclude in time");
        println!("fight did not conclude within {max_secs}s");
    }

    let summary = encounter.summary();
    println!("--- summary ---");
    println!("outcome:            {:?}", summary.outcome);
    println!("duration:           {:.1}s", summary.duration_secs);
    println!("damage to boss:     {:.0}", summary.damage_to_boss);
    println!("thresholds crossed: {}", summary.thresholds_crossed);
    println!("threads broken:     {}", summary.threads_broken);
    println!(
        "qte record:         {} passed / {} failed",
        summary.qte_successes, summary.qte_failures
    );
    println!(
        "player hits taken:  {} ({:.0} damage)",
        summary.player_hits, summary.player_damage
    );

    Ok(())
}

/// Load and validate a definition file, or every `.toml` in a directory,
/// reporting the first problem found.
pub fn validate(path: &str) -> Result<(), String> {
    let path = Path::new(path);
    if path.is_dir() {
        tracing::info!(path = %path.display(), "validating definition directory");
        let files = load_encounters_from_dir(path).map_err(|e| e.to_string())?;
        for file in &files {
            println!(
                "`{}` is valid ({} projectile specs, {} patterns)",
                file.encounter.id,
                file.projectiles.len(),
                file.patterns.len()
            );
        }
        println!("{} definition(s) valid", files.len());
        return Ok(());
    }

    let file = load_encounter_file(path).map_err(|e| e.to_string())?;
    println!(
        "`{}` is valid ({} projectile specs, {} patterns)",
        file.encounter.id,
        file.projectiles.len(),
        file.patterns.len()
    );
    Ok(())
}
