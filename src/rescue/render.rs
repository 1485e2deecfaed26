//! Duck Rescue drawing. Pure reads of game state; `now_ms` only drives the
//! ducklings' idle bob.

use crate::Phase;
use crate::storage::HighScoreStore;
use crate::surface::{GlyphStyle, Surface};

use super::engine::{Facing, RescueGame};
use super::input::Joystick;

const NEST: &str = "🪺";
const MOTHER: &str = "🦢";
const DUCKLING: &str = "🐥";
const LOST_DUCKLING: &str = "🐣";

/// Vertical idle offset of duckling `rank` at `now_ms`.
pub fn bob_offset(now_ms: f64, rank: usize) -> f64 {
    (now_ms * 0.01 + rank as f64).sin() * 3.0
}

pub fn render<S: HighScoreStore>(game: &RescueGame<S>, surface: &mut impl Surface, now_ms: f64) {
    let cfg = game.config();
    surface.clear(cfg.field_size, cfg.field_size);

    surface.glyph(NEST, cfg.nest.x, cfg.nest.y, GlyphStyle::sized(45.0));
    for (hazard, hcfg) in game.hazards() {
        surface.glyph(&hcfg.glyph, hazard.pos.x, hazard.pos.y, GlyphStyle::sized(hcfg.glyph_px));
    }

    let agent = game.agent();
    surface.glyph(
        MOTHER,
        agent.pos.x,
        agent.pos.y,
        GlyphStyle {
            size_px: 40.0,
            mirrored: agent.facing == Facing::Left,
            glow: agent.boosting,
        },
    );

    for rank in 0..game.followers() {
        // not enough trail yet: this duckling has no slot to stand on
        let Some(p) = game.follower_position(rank) else { continue };
        surface.glyph(DUCKLING, p.x, p.y + bob_offset(now_ms, rank), GlyphStyle::sized(20.0));
    }

    let lost = game.collectible();
    surface.glyph(LOST_DUCKLING, lost.x, lost.y, GlyphStyle::sized(24.0));
}

pub fn render_joystick(surface: &mut impl Surface, stick: &Joystick) {
    surface.fill_circle(stick.base.x, stick.base.y, stick.radius, "rgba(255, 255, 255, 0.2)");
    surface.fill_circle(stick.knob.x, stick.knob.y, 20.0, "rgba(255, 255, 255, 0.5)");
}

/// Dimmed banner for the non-running phases.
pub fn render_overlay<S: HighScoreStore>(game: &RescueGame<S>, surface: &mut impl Surface) {
    let title = match game.phase() {
        Phase::Running => return,
        Phase::NotStarted => "DUCK RESCUE",
        Phase::Paused => "PAUSED",
        Phase::Ended => "GAME OVER",
    };
    let size = game.config().field_size;
    let (cx, cy) = (size / 2.0, size / 2.0);
    surface.fill_rect(0.0, 0.0, size, size, "rgba(0,0,0,0.55)");
    surface.text(title, cx, cy - 20.0, 36.0, "#ffffff");
    surface.text(&format!("High Score: {}", game.high_score()), cx, cy + 20.0, 16.0, "#ffd166");
    if game.phase() == Phase::Ended {
        surface.text(
            &format!("Total Casualties: {}", game.casualties()),
            cx,
            cy + 44.0,
            16.0,
            "#ff6b6b",
        );
    }
}
