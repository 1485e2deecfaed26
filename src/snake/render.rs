use crate::Phase;
use crate::storage::HighScoreStore;
use crate::surface::Surface;

use super::engine::{Direction, SnakeGame};

const HEAD: &str = "#2ecc71";
const BODY: &str = "#27ae60";
const APPLE: &str = "#ff4d6d";

pub fn render<S: HighScoreStore>(game: &SnakeGame<S>, surface: &mut impl Surface) {
    let cfg = game.config();
    let cell = cfg.cell_px;
    surface.fill_rect(0.0, 0.0, cfg.width_px(), cfg.height_px(), "black");

    for (index, part) in game.body().iter().enumerate() {
        let (px, py) = (part.x as f64 * cell, part.y as f64 * cell);
        let is_head = index == 0;
        let (radius, color) = if is_head { (10.0, HEAD) } else { (6.0, BODY) };
        surface.fill_round_rect(px + 1.0, py + 1.0, cell - 2.0, cell - 2.0, radius, color);
        if is_head {
            // eyes sit across the direction of travel
            let eyes = match game.direction() {
                Direction::Up | Direction::Down => [(6.0, 10.0), (14.0, 10.0)],
                Direction::Left | Direction::Right => [(10.0, 6.0), (10.0, 14.0)],
            };
            for (ex, ey) in eyes {
                surface.fill_circle(px + ex * cell / 20.0, py + ey * cell / 20.0, 3.0, "white");
            }
        }
    }

    let food = game.food();
    let (fx, fy) = (food.x as f64 * cell, food.y as f64 * cell);
    surface.fill_circle(fx + cell / 2.0, fy + cell / 2.0, cell / 2.0 - 2.0, APPLE);
    surface.fill_rect(fx + cell / 2.0, fy + 2.0, 2.0, 4.0, HEAD); // leaf
}

pub fn render_overlay<S: HighScoreStore>(game: &SnakeGame<S>, surface: &mut impl Surface) {
    let title = match game.phase() {
        Phase::Running => return,
        Phase::NotStarted => "SNAKE",
        Phase::Paused => "PAUSED",
        Phase::Ended => "GAME OVER",
    };
    let cfg = game.config();
    let (w, h) = (cfg.width_px(), cfg.height_px());
    surface.fill_rect(0.0, 0.0, w, h, "rgba(0,0,0,0.6)");
    surface.text(title, w / 2.0, h / 2.0 - 30.0, 40.0, "#ffffff");
    surface.text(&format!("Apples Eaten: {}", game.score()), w / 2.0, h / 2.0 + 10.0, 18.0, APPLE);
    surface.text(&format!("High Score: {}", game.high_score()), w / 2.0, h / 2.0 + 36.0, 18.0, "#ffd166");
}
