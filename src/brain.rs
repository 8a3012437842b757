//! The decision/learning boundary. The arena never inspects a brain's
//! internals: it supplies a state vector once per tick and receives one
//! discrete action back, then forwards the shaped reward. Any learning
//! algorithm can sit behind this trait.

/// External policy/learning collaborator.
///
/// The state vector has length `sensor_count * 6 + 2` (sensory state plus
/// the agent's own velocity components); the returned action index lies in
/// `0..ACTIONS`.
pub trait Brain {
    /// Maps a state vector to a discrete action index.
    fn decide(&mut self, state: &[f64]) -> usize;

    /// Feeds back the total reward earned by the last decision.
    fn learn(&mut self, reward: f64);

    /// Toggles training mode (e.g. exploration/epsilon decay).
    fn set_training_mode(&mut self, enabled: bool);

    /// Restores previously learned state. Persistence is entirely the
    /// brain's concern; load failures propagate to the caller.
    fn load(&mut self, _state: &serde_json::Value) -> anyhow::Result<()> {
        anyhow::bail!("this brain does not support loading learned state")
    }
}

/// Number of discrete actions: impulses along -x, +x, -y, +y.
pub const ACTIONS: usize = 4;
