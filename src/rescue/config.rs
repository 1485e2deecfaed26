//! Duck Rescue tuning. Every rule difference between the old script variants
//! (control scheme, lives, crocodile lethality) is a field here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// How touch input is turned into movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ControlScheme {
    /// Virtual stick anchored at the touch start point.
    #[default]
    Joystick,
    /// A swipe latches a direction until the next swipe.
    Swipe,
    /// The mother swims toward the finger / mouse drag position.
    PointerFollow,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HazardConfig {
    pub name: String,
    pub glyph: String,
    pub glyph_px: f64,
    pub start: Point,
    pub respawn_x: f64, // x used at session start and after a lost life
    pub speed: f64,     // signed, px per frame along x
    pub exit_x: f64,    // wrap once past this x in the direction of travel
    pub reenter_x: f64,
    pub lane_min_y: f64,
    pub lane_max_y: f64,
    /// Touching the mother within this radius costs a life.
    pub lethal_radius: Option<f64>,
    /// Touching a duckling's trail slot within this radius cuts the line.
    pub sever_radius: Option<f64>,
    /// Severed ducklings are eaten (counted as casualties) rather than scattered.
    pub eats_ducklings: bool,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self::pike()
    }
}

impl HazardConfig {
    /// Line breaker: scatters the tail of the line, harmless to the mother.
    pub fn pike() -> Self {
        Self {
            name: "pike".into(),
            glyph: "🐟".into(),
            glyph_px: 30.0,
            start: Point::new(-50.0, 150.0),
            respawn_x: -100.0,
            speed: 2.2,
            exit_x: 450.0,
            reenter_x: -50.0,
            lane_min_y: 50.0,
            lane_max_y: 350.0,
            lethal_radius: None,
            sever_radius: Some(20.0),
            eats_ducklings: false,
        }
    }

    /// Predator: eats ducklings it bites through and can catch the mother.
    pub fn crocodile() -> Self {
        Self {
            name: "crocodile".into(),
            glyph: "🐊".into(),
            glyph_px: 45.0,
            start: Point::new(500.0, 300.0),
            respawn_x: 500.0,
            speed: -1.2,
            exit_x: -100.0,
            reenter_x: 500.0,
            lane_min_y: 50.0,
            lane_max_y: 350.0,
            lethal_radius: Some(30.0),
            sever_radius: Some(25.0),
            eats_ducklings: true,
        }
    }

    /// True once the hazard has travelled past its exit threshold. A parked
    /// hazard (speed 0) never wraps.
    pub fn has_exited(&self, x: f64) -> bool {
        if self.speed > 0.0 {
            x > self.exit_x
        } else if self.speed < 0.0 {
            x < self.exit_x
        } else {
            false
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RescueConfig {
    pub field_size: f64, // square playfield, logical px
    pub agent_inset: f64, // half the mother's visual size
    pub agent_start: Point,
    pub base_speed: f64,
    pub boost_speed: f64,
    pub stamina_max: f64,
    pub stamina_drain: f64, // per boosted frame
    pub stamina_regen: f64, // per non-boosted frame
    pub trail_cap: usize,
    pub follower_stride: usize,
    pub spawn_margin: f64, // collectible spawns in [margin, size - margin]
    pub pickup_radius: f64,
    pub nest: Point,
    pub nest_radius: f64,
    pub hazards: Vec<HazardConfig>,
    /// `None` disables lives: the first lethal hit ends the session.
    pub lives: Option<u32>,
    pub controls: ControlScheme,
    pub joystick_radius: f64,
    pub joystick_threshold: f64,
    pub double_tap_ms: f64,
    pub high_score_key: String,
}

impl Default for RescueConfig {
    fn default() -> Self {
        Self {
            field_size: 400.0,
            agent_inset: 20.0,
            agent_start: Point::new(200.0, 200.0),
            base_speed: 3.0,
            boost_speed: 7.0,
            stamina_max: 100.0,
            stamina_drain: 1.5,
            stamina_regen: 0.5,
            trail_cap: 300,
            follower_stride: 15,
            spawn_margin: 40.0,
            pickup_radius: 30.0,
            nest: Point::new(340.0, 60.0),
            nest_radius: 40.0,
            hazards: vec![HazardConfig::pike(), HazardConfig::crocodile()],
            lives: Some(5),
            controls: ControlScheme::Joystick,
            joystick_radius: 40.0,
            joystick_threshold: 10.0,
            double_tap_ms: 300.0,
            high_score_key: "duckRescueHighScore".into(),
        }
    }
}

impl RescueConfig {
    /// Longest line whose every duckling has a trail slot.
    pub fn max_followers(&self) -> usize {
        if self.follower_stride == 0 {
            return 0;
        }
        self.trail_cap.saturating_sub(1) / self.follower_stride
    }

    /// Trail index a duckling of `rank` (0 = right behind the mother) is drawn at.
    pub fn trail_slot(&self, rank: usize) -> usize {
        self.follower_stride * (rank + 1)
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
