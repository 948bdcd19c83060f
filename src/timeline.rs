//! Scripted bullet patterns for the middle of the encounter.
//!
//! The script is a list of cues. Each cue pairs a trigger on the phase timer
//! with a volley of free bullets. The phase timer only advances while the
//! encounter's health is in the yellow band, so the script pauses whenever
//! health leaves that band and resumes where it stopped.

use std::f32::consts::TAU;

use crate::entities::{FreeBullet, Rgb};
use crate::geometry::{Field, Vector};

/// Radius of the column and corner shots.
const COLUMN_RADIUS: f32 = 25.0;
const RADIAL_8_RADIUS: f32 = 10.0;
const RADIAL_16_RADIUS: f32 = 5.0;
/// Direction component used by the hand-placed straight shots.
const DRIFT: f32 = 0.5;
/// Inset of the two radial emitters from the top corners.
const EMITTER_INSET: f32 = 150.0;

/// When a cue fires, in phase-timer ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    At(u32),
    /// Every `period` ticks from `from` (inclusive) up to `until` (exclusive).
    Every {
        from: u32,
        until: Option<u32>,
        period: u32,
    },
}

impl Trigger {
    pub fn fires(&self, t: u32) -> bool {
        match *self {
            Trigger::At(at) => t == at,
            Trigger::Every {
                from,
                until,
                period,
            } => {
                t >= from
                    && until.is_none_or(|end| t < end)
                    && (t - from).is_multiple_of(period.max(1))
            }
        }
    }
}

/// A single hand-placed straight shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub x: f32,
    pub y: f32,
    pub direction: Vector,
    pub radius: f32,
}

impl Shot {
    fn new(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Self {
            x,
            y,
            direction: Vector::new(dx, dy),
            radius: COLUMN_RADIUS,
        }
    }
}

/// Rotation applied to a radial volley, growing with elapsed phase time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub from: u32,
    pub period: u32,
    pub step_degrees: f32,
}

impl Spin {
    /// `((t - from) / period) * step`, with integer division on the tick part.
    pub fn angle(&self, t: u32) -> f32 {
        let steps = t.saturating_sub(self.from) / self.period.max(1);
        (steps as f32 * self.step_degrees).to_radians()
    }
}

/// The bullets a cue adds when it fires
#[derive(Debug, Clone, PartialEq)]
pub enum Volley {
    Shots(Vec<Shot>),
    /// `ways` equally spaced directions fired from every origin.
    Radial {
        ways: u32,
        origins: Vec<(f32, f32)>,
        radius: f32,
        spin: Option<Spin>,
    },
}

impl Volley {
    fn bullets(&self, t: u32) -> Vec<FreeBullet> {
        match self {
            Volley::Shots(shots) => shots
                .iter()
                .map(|s| FreeBullet::new(s.x, s.y, s.direction, Rgb::WHITE, s.radius))
                .collect(),
            Volley::Radial {
                ways,
                origins,
                radius,
                spin,
            } => {
                let theta = spin.map_or(0.0, |s| s.angle(t));
                let directions: Vec<Vector> = (0..*ways)
                    .map(|k| Vector::from_angle(k as f32 * TAU / *ways as f32).rotated(theta))
                    .collect();
                let mut bullets = Vec::with_capacity(directions.len() * origins.len());
                for direction in directions {
                    for &(x, y) in origins {
                        bullets.push(FreeBullet::new(x, y, direction, Rgb::WHITE, *radius));
                    }
                }
                bullets
            }
        }
    }
}

/// A named trigger and volley pair
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub name: &'static str,
    pub trigger: Trigger,
    pub volley: Volley,
}

impl Cue {
    /// Bullets this cue adds at phase time `t`; empty when it does not fire.
    pub fn emit(&self, t: u32) -> Vec<FreeBullet> {
        if self.trigger.fires(t) {
            self.volley.bullets(t)
        } else {
            Vec::new()
        }
    }
}

/// Ordered cue list run against the phase timer
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    cues: Vec<Cue>,
}

impl Timeline {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self { cues }
    }

    /// The encounter's built-in script, laid out for `field`.
    pub fn standard(field: &Field) -> Self {
        let w = field.width;
        let edge = COLUMN_RADIUS;

        let twin_columns = || {
            let mut shots = Vec::new();
            for i in (0..250).step_by(50) {
                let offset = i as f32;
                shots.push(Shot::new(edge + offset, 50.0, 0.0, DRIFT));
                shots.push(Shot::new(w - edge - offset, 50.0, 0.0, DRIFT));
            }
            shots
        };
        let centre_columns = (0..400)
            .step_by(50)
            .map(|i| Shot::new(125.0 + i as f32, 50.0, 0.0, DRIFT))
            .collect();
        let crossing = |left_y: f32, right_y: f32| {
            Volley::Shots(vec![
                Shot::new(edge, left_y, DRIFT, 0.0),
                Shot::new(w - edge, right_y, -DRIFT, 0.0),
            ])
        };
        let emitters = vec![(EMITTER_INSET, EMITTER_INSET), (w - EMITTER_INSET, EMITTER_INSET)];

        Self::new(vec![
            Cue {
                name: "twin_columns",
                trigger: Trigger::At(0),
                volley: Volley::Shots(twin_columns()),
            },
            Cue {
                name: "centre_columns",
                trigger: Trigger::At(60),
                volley: Volley::Shots(centre_columns),
            },
            Cue {
                name: "twin_columns_again",
                trigger: Trigger::At(120),
                volley: Volley::Shots(twin_columns()),
            },
            Cue {
                name: "crossing_500_600",
                trigger: Trigger::At(240),
                volley: crossing(500.0, 600.0),
            },
            Cue {
                name: "crossing_600_500",
                trigger: Trigger::At(300),
                volley: crossing(600.0, 500.0),
            },
            Cue {
                name: "crossing_450_450",
                trigger: Trigger::At(360),
                volley: crossing(450.0, 450.0),
            },
            Cue {
                name: "crossing_650_550",
                trigger: Trigger::At(420),
                volley: crossing(650.0, 550.0),
            },
            Cue {
                name: "corner_rain",
                trigger: Trigger::Every {
                    from: 120,
                    until: None,
                    period: 20,
                },
                volley: Volley::Shots(vec![
                    Shot::new(edge, edge, 0.0, DRIFT),
                    Shot::new(w - edge, edge, 0.0, DRIFT),
                ]),
            },
            Cue {
                name: "radial_8",
                trigger: Trigger::Every {
                    from: 180,
                    until: Some(480),
                    period: 30,
                },
                volley: Volley::Radial {
                    ways: 8,
                    origins: emitters.clone(),
                    radius: RADIAL_8_RADIUS,
                    spin: None,
                },
            },
            Cue {
                name: "radial_16_spin",
                trigger: Trigger::Every {
                    from: 480,
                    until: None,
                    period: 30,
                },
                volley: Volley::Radial {
                    ways: 16,
                    origins: emitters,
                    radius: RADIAL_16_RADIUS,
                    spin: Some(Spin {
                        from: 480,
                        period: 30,
                        step_degrees: 5.0,
                    }),
                },
            },
        ])
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Looks a cue up by name
    pub fn cue(&self, name: &str) -> Option<&Cue> {
        self.cues.iter().find(|c| c.name == name)
    }

    /// Every bullet the script adds at phase time `t`, in cue order.
    pub fn emit(&self, t: u32) -> Vec<FreeBullet> {
        self.cues.iter().flat_map(|cue| cue.emit(t)).collect()
    }
}
