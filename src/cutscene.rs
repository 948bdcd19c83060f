//! Special-ability cutscene playback.
//!
//! The simulation only sees the [`Cutscene`] trait. The terminal
//! implementation either flips through still images loaded from a directory
//! or plays a built-in text banner, and always stops after the frame budget.

use std::fs;
use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::DynamicImage;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use ratatui_image::{StatefulImage, picker::Picker};
use tracing::{debug, info, warn};

use crate::config::CUTSCENE_FRAME_DELAY;
use crate::error::GameError;

/// Frames in the built-in banner animation.
pub const BANNER_FRAMES: u32 = 60;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutsceneReport {
    pub frames_shown: u32,
    /// The clip was cut short by the frame budget.
    pub truncated: bool,
}

/// Blocking playback collaborator.
pub trait Cutscene {
    /// Plays until the clip ends or `frame_budget` frames have been shown.
    fn play(&mut self, frame_budget: u32) -> Result<CutsceneReport, GameError>;
}

/// Plays nothing; used headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCutscene;

impl Cutscene for NoCutscene {
    fn play(&mut self, _frame_budget: u32) -> Result<CutsceneReport, GameError> {
        Ok(CutsceneReport {
            frames_shown: 0,
            truncated: false,
        })
    }
}

/// Source material for the terminal cutscene.
pub enum CutsceneFrames {
    Banner,
    Images(Vec<DynamicImage>),
}

impl CutsceneFrames {
    /// Loads every image in `dir`, in file-name order. A configured directory
    /// that is missing, empty or holds an unreadable image is fatal.
    pub fn load(dir: Option<&Path>) -> Result<Self, GameError> {
        let Some(dir) = dir else {
            return Ok(Self::Banner);
        };

        let entries = fs::read_dir(dir).map_err(|_| GameError::AssetMissing {
            path: dir.to_path_buf(),
        })?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_image(path))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(GameError::AssetMissing {
                path: dir.to_path_buf(),
            });
        }

        let mut frames = Vec::with_capacity(paths.len());
        for path in paths {
            let frame = image::open(&path).map_err(|e| GameError::AssetDecode {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            frames.push(frame);
        }
        info!(dir = %dir.display(), frames = frames.len(), "loaded cutscene frames");
        Ok(Self::Images(frames))
    }

    /// Frames in the clip before any budget is applied
    pub fn len(&self) -> u32 {
        match self {
            Self::Banner => BANNER_FRAMES,
            Self::Images(frames) => frames.len() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Number of frames to show and whether the budget cut the clip short.
pub fn frames_to_play(clip_len: u32, frame_budget: u32) -> (u32, bool) {
    (clip_len.min(frame_budget), clip_len > frame_budget)
}

/// Draws the cutscene straight onto the game terminal.
pub struct TerminalCutscene<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
    frames: &'a CutsceneFrames,
    picker: &'a Picker,
    frame_delay: Duration,
}

impl<'a> TerminalCutscene<'a> {
    pub fn new(
        terminal: &'a mut Terminal<CrosstermBackend<Stdout>>,
        frames: &'a CutsceneFrames,
        picker: &'a Picker,
    ) -> Self {
        Self {
            terminal,
            frames,
            picker,
            frame_delay: CUTSCENE_FRAME_DELAY,
        }
    }

    fn draw_frame(&mut self, index: u32) -> Result<(), GameError> {
        let result = match self.frames {
            CutsceneFrames::Banner => self.terminal.draw(|frame| {
                let area = frame.area();
                render_banner(frame.buffer_mut(), area, index);
            }),
            CutsceneFrames::Images(images) => {
                let image = images[index as usize].clone();
                let mut protocol = self.picker.new_resize_protocol(image);
                self.terminal.draw(|frame| {
                    let area = frame.area();
                    frame.render_stateful_widget(StatefulImage::default(), area, &mut protocol);
                })
            }
        };
        result.map(|_| ()).map_err(|e| GameError::Terminal {
            reason: e.to_string(),
        })
    }
}

impl Cutscene for TerminalCutscene<'_> {
    fn play(&mut self, frame_budget: u32) -> Result<CutsceneReport, GameError> {
        let (frames, truncated) = frames_to_play(self.frames.len(), frame_budget);
        // Hard stop in case the terminal stalls on every draw
        let deadline = Instant::now() + self.frame_delay * frame_budget + Duration::from_secs(1);

        let mut shown = 0;
        for index in 0..frames {
            if Instant::now() > deadline {
                warn!(shown, frames, "cutscene ran past its deadline");
                return Ok(CutsceneReport {
                    frames_shown: shown,
                    truncated: true,
                });
            }
            self.draw_frame(index)?;
            shown += 1;
            std::thread::sleep(self.frame_delay);
        }
        debug!(shown, truncated, "cutscene finished");
        Ok(CutsceneReport {
            frames_shown: shown,
            truncated,
        })
    }
}

fn render_banner(buffer: &mut ratatui::buffer::Buffer, area: Rect, index: u32) {
    use ratatui::widgets::Widget;

    let color = if index % 6 < 3 { Color::Red } else { Color::Yellow };
    // Grows from a single line to the full banner over the first frames
    let reveal = (index as usize / 4).min(4);
    let lines = [
        "",
        "★ 必 殺 ★",
        "SPECIAL ATTACK",
        "all bullets cleared",
        "",
    ];
    let text: Vec<Line> = lines[..=reveal]
        .iter()
        .map(|l| Line::from(*l).style(Style::default().fg(color).add_modifier(Modifier::BOLD)))
        .collect();

    let height = 7.min(area.height);
    let banner_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: area.width,
        height,
    };
    Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(color)),
        )
        .alignment(Alignment::Center)
        .render(banner_area, buffer);
}
