/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Won,
    Lost,
}

/// Whether the simulation is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// Terminal: the simulation no longer advances.
    Over(MatchOutcome),
}

impl GameState {
    /// Returns true once the match has been decided
    pub fn is_over(&self) -> bool {
        matches!(self, GameState::Over(_))
    }
}
