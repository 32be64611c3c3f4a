use super::signal::EncounterSignal;

/// Trait for systems that react to encounter signals.
/// Implement this for HUD bars, audio cues, animation triggers,
/// progression unlocks, etc.
pub trait SignalHandler {
    /// Handle a single signal.
    fn handle_signal(&mut self, signal: &EncounterSignal);

    /// Handle multiple signals (default implementation calls handle_signal
    /// for each)
    fn handle_signals(&mut self, signals: &[EncounterSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }

    /// Called when the encounter starts (optional hook for reset logic)
    fn on_encounter_start(&mut self) {}

    /// Called when the encounter concludes (optional hook for cleanup)
    fn on_encounter_end(&mut self) {}
}
