//! The simulation state and its fixed-order tick.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::collision;
use crate::config::{
    ENEMY_SPAWN_TICK, EXPLOSION_LIFE, GameConfig, MAX_HEALTH, PLAYER_SPAWN_OFFSET, SPECIAL_USES,
};
use crate::cutscene::Cutscene;
use crate::entities::{
    Beam, Bullet, Enemy, Explosion, FreeBullet, GameState, HealthBar, MatchOutcome, MoveKeys,
    Player, Pose, Special, advance_and_cull, update_explosions,
};
use crate::error::GameError;
use crate::geometry::Field;
use crate::timeline::Timeline;

/// What happened during one call to [`World::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub enemies_hit: usize,
    pub damage: i32,
    pub aimed_shots: usize,
    pub script_shots: usize,
    pub outcome: Option<MatchOutcome>,
}

/// The whole match: entities, counters and the seeded RNG
pub struct World {
    pub field: Field,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub beams: Vec<Beam>,
    pub bullets: Vec<Bullet>,
    pub free_bullets: Vec<FreeBullet>,
    pub explosions: Vec<Explosion>,
    pub health: i32,
    pub max_health: i32,
    pub special: Special,
    /// Ticks since the match began.
    pub tick: u64,
    /// Ticks spent in the scripted phase; never reset.
    pub phase_timer: u32,
    pub timeline: Timeline,
    pub state: GameState,
    in_phase: bool,
    rng: StdRng,
}

impl World {
    /// Starts a match, seeding the RNG from the config or from OS entropy
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        let field = config.field;
        Self {
            field,
            player: Player::new(field.width / 2.0, field.height - PLAYER_SPAWN_OFFSET),
            enemies: Vec::new(),
            beams: Vec::new(),
            bullets: Vec::new(),
            free_bullets: Vec::new(),
            explosions: Vec::new(),
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            special: Special::new(SPECIAL_USES, config.cutscene_frame_budget),
            tick: 0,
            phase_timer: 0,
            timeline: Timeline::standard(&field),
            state: GameState::Playing,
            in_phase: false,
            rng,
        }
    }

    /// Health bar rebuilt from the current health
    pub fn health_bar(&self) -> HealthBar {
        HealthBar::new(self.health, self.max_health)
    }

    /// Returns true once the match is won or lost
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Launches a beam from the player. Ignored once the match is over.
    pub fn fire_beam(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.beams.push(Beam::fired_from(&self.player.rect));
        true
    }

    /// Spends a special use if one is left, clearing every enemy bullet.
    pub fn activate_special(&mut self, cutscene: &mut dyn Cutscene) -> Result<bool, GameError> {
        if self.is_over() {
            return Ok(false);
        }
        self.special
            .activate(cutscene, &mut self.bullets, &mut self.free_bullets)
    }

    /// Advances the simulation by one tick. Does nothing once the match is over.
    pub fn tick(&mut self, keys: MoveKeys) -> Result<TickReport, GameError> {
        let mut report = TickReport::default();
        if self.is_over() {
            return Ok(report);
        }

        if self.tick == ENEMY_SPAWN_TICK {
            let enemy = Enemy::spawn(&self.field, &mut self.rng);
            debug!(
                stop_depth = enemy.stop_depth,
                fire_interval = enemy.fire_interval,
                "enemy spawned"
            );
            self.enemies.push(enemy);
        }

        self.fire(&mut report)?;

        let resolution = collision::resolve(
            &self.player.rect,
            &self.enemies,
            &mut self.beams,
            &mut self.bullets,
            &mut self.free_bullets,
            self.health,
            self.max_health,
        );
        report.enemies_hit = resolution.enemies_hit.len();
        report.damage = resolution.damage;
        if !resolution.enemies_hit.is_empty() {
            self.health -= resolution.damage;
            self.player.change_pose(Pose::Joy);
            for &idx in &resolution.enemies_hit {
                self.explosions
                    .push(Explosion::at(&self.enemies[idx].rect, EXPLOSION_LIFE));
            }
            debug!(health = self.health, hits = report.enemies_hit, "enemy hit");
        }

        if let Some(outcome) = resolution.outcome {
            self.player.change_pose(match outcome {
                MatchOutcome::Won => Pose::Joy,
                MatchOutcome::Lost => Pose::Sad,
            });
            self.state = GameState::Over(outcome);
            report.outcome = Some(outcome);
            info!(?outcome, tick = self.tick, health = self.health, "match over");
            return Ok(report);
        }

        self.player.apply_input(keys, &self.field);
        advance_and_cull(&mut self.beams, &self.field);
        for enemy in &mut self.enemies {
            enemy.update();
        }
        advance_and_cull(&mut self.bullets, &self.field);
        advance_and_cull(&mut self.free_bullets, &self.field);
        update_explosions(&mut self.explosions);

        self.tick += 1;
        Ok(report)
    }

    /// Scripted volleys while health is in the yellow band, aimed fire otherwise.
    fn fire(&mut self, report: &mut TickReport) -> Result<(), GameError> {
        let in_phase = self.health_bar().in_script_phase();
        if in_phase != self.in_phase {
            info!(in_phase, phase_timer = self.phase_timer, "scripted phase changed");
            self.in_phase = in_phase;
        }

        if in_phase {
            let volley = self.timeline.emit(self.phase_timer);
            report.script_shots = volley.len();
            self.free_bullets.extend(volley);
            self.phase_timer += 1;
            return Ok(());
        }

        for enemy in self.enemies.iter().filter(|e| e.should_fire(self.tick)) {
            match Bullet::aimed(&enemy.rect, &self.player.rect, &mut self.rng) {
                Ok(bullet) => {
                    self.bullets.push(bullet);
                    report.aimed_shots += 1;
                }
                // Player sits exactly on the enemy's centre; nothing to aim at
                Err(GameError::DegenerateDirection { x, y }) => {
                    debug!(x, y, tick = self.tick, "aimed shot skipped");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}
