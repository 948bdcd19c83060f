// Library exports for the binary and the integration tests
pub use app::App;
pub use config::GameConfig;
pub use cutscene::{Cutscene, CutsceneReport, NoCutscene};
pub use entities::{
    Beam, Bullet, Enemy, EnemyState, Explosion, Facing, FreeBullet, GameState, HealthBand,
    HealthBar, MatchOutcome, MoveKeys, Player, Pose, Special,
};
pub use error::GameError;
pub use geometry::{Field, Rect, Vector};
pub use timeline::Timeline;
pub use world::{TickReport, World};

pub mod app;
pub mod audio;
pub mod collision;
pub mod config;
pub mod cutscene;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod timeline;
pub mod world;
