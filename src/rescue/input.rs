//! Input capture for Duck Rescue.
//!
//! Browser listeners write into `InputState` whenever events arrive; the frame
//! loop reads one `InputSnapshot` per tick. Nothing here touches the DOM, so the
//! joystick / swipe / double-tap rules are unit tested natively.

use crate::geom::Point;

use super::config::{ControlScheme, RescueConfig};

/// What the engine sees for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Swim toward this point (pointer-follow control). Ignored while any
    /// direction is held.
    pub target: Option<Point>,
    pub boost: bool,
}

impl InputSnapshot {
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Dirs {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

/// Virtual stick, in canvas coordinates. `knob` stays within the stick radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joystick {
    pub base: Point,
    pub knob: Point,
    pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    keys: Dirs,
    touch: Dirs,
    key_boost: bool,
    touch_boost: bool,
    target: Option<Point>,
    pointer_down: bool,
    stick: Option<Joystick>,
    swipe_origin: Option<Point>,
    last_tap_ms: Option<f64>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            up: self.keys.up || self.touch.up,
            down: self.keys.down || self.touch.down,
            left: self.keys.left || self.touch.left,
            right: self.keys.right || self.touch.right,
            target: self.target,
            boost: self.key_boost || self.touch_boost,
        }
    }

    pub fn joystick(&self) -> Option<Joystick> {
        self.stick
    }

    /// Drop everything held (after a lost life or a restart).
    pub fn clear(&mut self) {
        let last_tap_ms = self.last_tap_ms;
        *self = Self { last_tap_ms, ..Self::default() };
    }

    // --- Keyboard (KeyboardEvent.code) ---------------------------------------

    /// Returns true when the key is one of ours (caller may prevent default).
    pub fn key_down(&mut self, code: &str) -> bool {
        self.set_key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.set_key(code, false)
    }

    fn set_key(&mut self, code: &str, pressed: bool) -> bool {
        match code {
            "ArrowUp" | "KeyW" => self.keys.up = pressed,
            "ArrowDown" | "KeyS" => self.keys.down = pressed,
            "ArrowLeft" | "KeyA" => self.keys.left = pressed,
            "ArrowRight" | "KeyD" => self.keys.right = pressed,
            "Space" => self.key_boost = pressed,
            _ => return false,
        }
        true
    }

    // --- Touch ---------------------------------------------------------------

    pub fn touch_start(&mut self, p: Point, now_ms: f64, agent: Point, cfg: &RescueConfig) {
        let double_tap = self
            .last_tap_ms
            .is_some_and(|last| now_ms - last < cfg.double_tap_ms);
        if double_tap || p.distance(agent) < cfg.agent_inset {
            self.touch_boost = true;
        }
        self.last_tap_ms = Some(now_ms);

        match cfg.controls {
            ControlScheme::Joystick => {
                self.stick = Some(Joystick { base: p, knob: p, radius: cfg.joystick_radius });
            }
            ControlScheme::Swipe => self.swipe_origin = Some(p),
            ControlScheme::PointerFollow => self.target = Some(p),
        }
    }

    pub fn touch_move(&mut self, p: Point, cfg: &RescueConfig) {
        let thres = cfg.joystick_threshold;
        match cfg.controls {
            ControlScheme::Joystick => {
                let Some(stick) = self.stick.as_mut() else { return };
                let (dx, dy) = (p.x - stick.base.x, p.y - stick.base.y);
                let dist = dx.hypot(dy);
                let reach = dist.min(stick.radius);
                let angle = dy.atan2(dx);
                stick.knob = Point::new(
                    stick.base.x + angle.cos() * reach,
                    stick.base.y + angle.sin() * reach,
                );
                self.touch = Dirs {
                    left: dx < -thres,
                    right: dx > thres,
                    up: dy < -thres,
                    down: dy > thres,
                };
            }
            ControlScheme::Swipe => {
                let Some(origin) = self.swipe_origin else { return };
                let (dx, dy) = (p.x - origin.x, p.y - origin.y);
                if dx.abs().max(dy.abs()) <= thres {
                    return;
                }
                self.touch = if dx.abs() >= dy.abs() {
                    Dirs { left: dx < 0.0, right: dx > 0.0, ..Dirs::default() }
                } else {
                    Dirs { up: dy < 0.0, down: dy > 0.0, ..Dirs::default() }
                };
                self.swipe_origin = Some(p);
            }
            ControlScheme::PointerFollow => self.target = Some(p),
        }
    }

    pub fn touch_end(&mut self, cfg: &RescueConfig) {
        self.touch_boost = false;
        self.stick = None;
        self.swipe_origin = None;
        match cfg.controls {
            // the swiped direction stays latched
            ControlScheme::Swipe => {}
            ControlScheme::Joystick => self.touch = Dirs::default(),
            ControlScheme::PointerFollow => self.target = None,
        }
    }

    // --- Mouse (pointer-follow drag) -------------------------------------------

    pub fn mouse_down(&mut self, p: Point, cfg: &RescueConfig) {
        if cfg.controls == ControlScheme::PointerFollow {
            self.pointer_down = true;
            self.target = Some(p);
        }
    }

    pub fn mouse_move(&mut self, p: Point) {
        if self.pointer_down {
            self.target = Some(p);
        }
    }

    pub fn mouse_up(&mut self) {
        self.pointer_down = false;
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(controls: ControlScheme) -> RescueConfig {
        RescueConfig { controls, ..RescueConfig::default() }
    }

    const FAR: Point = Point::new(390.0, 390.0);

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        let mut input = InputState::new();
        assert!(input.key_down("KeyA"));
        assert!(input.key_down("ArrowUp"));
        assert!(!input.key_down("KeyQ"));
        let snap = input.snapshot();
        assert!(snap.left && snap.up && !snap.right && !snap.down);
        input.key_up("KeyA");
        assert!(!input.snapshot().left);
    }

    #[test]
    fn space_holds_boost() {
        let mut input = InputState::new();
        input.key_down("Space");
        assert!(input.snapshot().boost);
        input.key_up("Space");
        assert!(!input.snapshot().boost);
    }

    #[test]
    fn joystick_threshold_and_knob_clamp() {
        let cfg = cfg(ControlScheme::Joystick);
        let mut input = InputState::new();
        input.touch_start(Point::new(100.0, 100.0), 0.0, FAR, &cfg);
        input.touch_move(Point::new(105.0, 100.0), &cfg);
        assert!(!input.snapshot().any_direction());

        input.touch_move(Point::new(200.0, 80.0), &cfg);
        let snap = input.snapshot();
        assert!(snap.right && snap.up && !snap.left && !snap.down);
        let stick = input.joystick().expect("stick active");
        let reach = stick.knob.distance(stick.base);
        assert!((reach - 40.0).abs() < 1e-9);

        input.touch_end(&cfg);
        assert!(!input.snapshot().any_direction());
        assert!(input.joystick().is_none());
    }

    #[test]
    fn double_tap_boosts_until_release() {
        let cfg = cfg(ControlScheme::Joystick);
        let mut input = InputState::new();
        input.touch_start(Point::new(10.0, 10.0), 1_000.0, FAR, &cfg);
        assert!(!input.snapshot().boost);
        input.touch_end(&cfg);
        input.touch_start(Point::new(10.0, 10.0), 1_200.0, FAR, &cfg);
        assert!(input.snapshot().boost);
        input.touch_end(&cfg);
        assert!(!input.snapshot().boost);
        // too slow for a double tap
        input.touch_start(Point::new(10.0, 10.0), 2_000.0, FAR, &cfg);
        assert!(!input.snapshot().boost);
    }

    #[test]
    fn tap_on_mother_boosts() {
        let cfg = cfg(ControlScheme::Joystick);
        let mut input = InputState::new();
        input.touch_start(Point::new(205.0, 195.0), 0.0, Point::new(200.0, 200.0), &cfg);
        assert!(input.snapshot().boost);
    }

    #[test]
    fn swipe_latches_dominant_axis() {
        let cfg = cfg(ControlScheme::Swipe);
        let mut input = InputState::new();
        input.touch_start(Point::new(100.0, 100.0), 0.0, FAR, &cfg);
        input.touch_move(Point::new(100.0, 60.0), &cfg);
        input.touch_end(&cfg);
        let snap = input.snapshot();
        assert!(snap.up && !snap.left && !snap.right && !snap.down);

        input.touch_start(Point::new(100.0, 100.0), 1_000.0, FAR, &cfg);
        input.touch_move(Point::new(160.0, 90.0), &cfg);
        let snap = input.snapshot();
        assert!(snap.right && !snap.up);
    }

    #[test]
    fn pointer_follow_tracks_drag() {
        let cfg = cfg(ControlScheme::PointerFollow);
        let mut input = InputState::new();
        input.mouse_move(Point::new(50.0, 50.0));
        assert_eq!(input.snapshot().target, None);
        input.mouse_down(Point::new(60.0, 70.0), &cfg);
        input.mouse_move(Point::new(80.0, 90.0));
        assert_eq!(input.snapshot().target, Some(Point::new(80.0, 90.0)));
        input.mouse_up();
        assert_eq!(input.snapshot().target, None);
    }

    #[test]
    fn clear_releases_everything() {
        let cfg = cfg(ControlScheme::Joystick);
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        input.key_down("Space");
        input.touch_start(Point::new(1.0, 1.0), 0.0, FAR, &cfg);
        input.clear();
        assert_eq!(input.snapshot(), InputSnapshot::default());
        assert!(input.joystick().is_none());
    }
}
