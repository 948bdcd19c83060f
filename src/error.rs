use std::fmt;
use std::path::PathBuf;

/// Faults that stop the game. Match outcomes (winning, losing, running out
/// of specials) are game state, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// A direction was requested between two coincident points.
    DegenerateDirection { x: f32, y: f32 },
    AssetMissing { path: PathBuf },
    AssetDecode { path: PathBuf, reason: String },
    InvalidConfig { key: &'static str, value: String },
    /// The terminal failed while drawing outside the main loop.
    Terminal { reason: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateDirection { x, y } => {
                write!(f, "cannot aim from ({x}, {y}) at itself")
            }
            Self::AssetMissing { path } => write!(f, "asset not found: {}", path.display()),
            Self::AssetDecode { path, reason } => {
                write!(f, "failed to decode {}: {reason}", path.display())
            }
            Self::InvalidConfig { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
            Self::Terminal { reason } => write!(f, "terminal error: {reason}"),
        }
    }
}

impl std::error::Error for GameError {}
