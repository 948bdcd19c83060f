mod enemy;
mod explosion;
mod game_state;
mod health_bar;
mod player;
pub mod projectile;
mod special;

// Re-export all public types
pub use enemy::{Enemy, EnemyState};
pub use explosion::{Explosion, update_explosions};
pub use game_state::{GameState, MatchOutcome};
pub use health_bar::{HealthBand, HealthBar};
pub use player::{Facing, MoveKeys, OrientationTable, Player, Pose};
pub use projectile::{
    BULLET_PALETTE, Beam, Bullet, FreeBullet, Mover, Rgb, advance_and_cull,
};
pub use special::Special;
