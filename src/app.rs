use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use ratatui_image::picker::Picker;
use std::io::Stdout;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::cutscene::{CutsceneFrames, TerminalCutscene};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::world::World;

/// Font size assumed when the terminal does not answer the size query.
const FALLBACK_FONT_SIZE: (u16, u16) = (8, 16);

/// Owns the world and the terminal-facing components and drives the frame loop.
pub struct App {
    running: bool,
    world: World,
    tick_duration: Duration,
    ticks_per_second: u32,
    match_over_pause: Duration,
    /// When the match ended; the loop exits after `match_over_pause`.
    over_since: Option<Instant>,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
    cutscene_frames: CutsceneFrames,
    picker: Picker,
}

impl App {
    /// Loads every configured asset up front; a missing one fails here, before
    /// the first frame.
    pub fn new(config: &GameConfig, release_events: bool) -> Result<Self> {
        let cutscene_frames = CutsceneFrames::load(config.cutscene_dir.as_deref())?;
        let picker = match cutscene_frames {
            CutsceneFrames::Images(_) => Picker::from_query_stdio()
                .unwrap_or_else(|_| Picker::from_fontsize(FALLBACK_FONT_SIZE)),
            CutsceneFrames::Banner => Picker::from_fontsize(FALLBACK_FONT_SIZE),
        };
        let audio_manager = AudioManager::new(config.fire_sound.as_deref())?;

        info!(
            seed = ?config.seed,
            tick_rate = config.tick_rate,
            release_events,
            audible = audio_manager.is_audible(),
            "starting match"
        );
        Ok(Self {
            running: true,
            world: World::new(config),
            tick_duration: config.tick_duration(),
            ticks_per_second: config.tick_rate,
            match_over_pause: config.match_over_pause,
            over_since: None,
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(),
            audio_manager,
            cutscene_frames,
            picker,
        })
    }

    /// Runs until the player quits or the match-over pause has elapsed.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            self.input_manager.poll_events()?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions, terminal)?;
            if !self.running {
                break;
            }

            let keys = self.input_manager.move_keys(Instant::now());
            let report = self.world.tick(keys)?;
            if report.outcome.is_some() {
                self.over_since = Some(Instant::now());
            }

            self.draw(terminal)?;

            if let Some(since) = self.over_since {
                if since.elapsed() >= self.match_over_pause {
                    info!("match-over pause elapsed, exiting");
                    self.running = false;
                }
            }

            let elapsed = frame_start.elapsed();
            if elapsed < self.tick_duration {
                std::thread::sleep(self.tick_duration - elapsed);
            }
        }
        Ok(())
    }

    fn process_actions(
        &mut self,
        actions: &[InputAction],
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        for action in actions {
            match action {
                InputAction::Quit => {
                    info!(tick = self.world.tick, "quit requested");
                    self.running = false;
                    return Ok(());
                }
                InputAction::FireBeam => {
                    if self.world.fire_beam() {
                        self.audio_manager.play_fire_sound();
                    }
                }
                InputAction::Special => {
                    let mut cutscene =
                        TerminalCutscene::new(terminal, &self.cutscene_frames, &self.picker);
                    let used = self.world.activate_special(&mut cutscene)?;
                    if used {
                        // Image protocols can leave cells behind; force a full redraw
                        terminal.clear()?;
                    } else {
                        debug!("special requested with no uses left");
                    }
                }
            }
        }
        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let world = &self.world;
        terminal.draw(|frame| {
            let view = RenderView {
                game_state: world.state,
                field: world.field,
                player: &world.player,
                enemies: &world.enemies,
                beams: &world.beams,
                bullets: &world.bullets,
                free_bullets: &world.free_bullets,
                explosions: &world.explosions,
                health_bar: world.health_bar(),
                special_lives: world.special.lives,
                tick: world.tick,
                ticks_per_second: self.ticks_per_second,
                area: frame.area(),
            };
            self.renderer.render(frame, &view);
        })?;
        Ok(())
    }
}
