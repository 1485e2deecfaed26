//! Duck Rescue game loop engine.
//!
//! `RescueGame` owns the whole session: the mother duck, her trail, the line of
//! rescued ducklings, the lost duckling, the nest and the hazards. `tick` advances
//! one display frame from an input snapshot; it never touches the DOM. Ducklings
//! have no position of their own: rank `r` sits on the trail sample
//! `stride * (r + 1)` frames behind the mother.

use std::collections::VecDeque;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Phase;
use crate::geom::Point;
use crate::storage::HighScoreStore;

use super::config::{HazardConfig, RescueConfig};
use super::input::InputSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agent {
    pub pos: Point,
    pub stamina: f64,
    pub boosting: bool, // boosted on the last tick (render highlight)
    pub facing: Facing,
}

/// Runtime position of a configured hazard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hazard {
    pub pos: Point,
}

/// Things that happened during one tick, for logging and UI feedback.
#[derive(Clone, Debug, PartialEq)]
pub enum RescueEvent {
    LifeLost { lives_left: u32 },
    GameOver { score: u32 },
    Severed { hazard: String, lost: usize, eaten: bool },
    Rescued { followers: usize },
    Delivered { count: usize },
    NewHighScore(u32),
}

pub struct RescueGame<S: HighScoreStore> {
    config: RescueConfig,
    store: S,
    rng: SmallRng,
    phase: Phase,
    agent: Agent,
    trail: VecDeque<Point>, // most recent first
    followers: usize,
    collectible: Point,
    hazards: Vec<Hazard>,
    score: u32,
    high_score: u32,
    lives: Option<u32>,
    casualties: u32,
    boost_spent: bool, // emptied the meter; re-armed by releasing boost
}

impl<S: HighScoreStore> RescueGame<S> {
    /// Build an idle game (`Phase::NotStarted`). The high score is read from
    /// `store` once, here.
    pub fn new(config: RescueConfig, store: S, seed: u64) -> Self {
        let high_score = store.load_high_score(&config.high_score_key);
        let hazards = config.hazards.iter().map(|h| Hazard { pos: h.start }).collect();
        let mut game = Self {
            agent: Agent {
                pos: config.agent_start,
                stamina: config.stamina_max,
                boosting: false,
                facing: Facing::Right,
            },
            trail: VecDeque::with_capacity(config.trail_cap + 1),
            followers: 0,
            collectible: Point::default(),
            hazards,
            score: 0,
            high_score,
            lives: config.lives,
            casualties: 0,
            boost_spent: false,
            phase: Phase::NotStarted,
            rng: SmallRng::seed_from_u64(seed),
            store,
            config,
        };
        game.respawn_collectible();
        game
    }

    // --- Session control ---------------------------------------------------

    /// Reset every piece of session state and enter `Running`.
    pub fn start(&mut self) {
        self.score = 0;
        self.lives = self.config.lives;
        self.casualties = 0;
        self.followers = 0;
        self.boost_spent = false;
        self.trail.clear();
        self.agent = Agent {
            pos: self.config.agent_start,
            stamina: self.config.stamina_max,
            boosting: false,
            facing: Facing::Right,
        };
        for (hazard, cfg) in self.hazards.iter_mut().zip(&self.config.hazards) {
            hazard.pos = Point::new(cfg.respawn_x, cfg.start.y);
        }
        self.respawn_collectible();
        self.phase = Phase::Running;
        info!("[Rescue] session started (high score {})", self.high_score);
    }

    /// Running <-> Paused. Ignored before start and after the game ended.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
    }

    // --- Per-frame update --------------------------------------------------

    pub fn tick(&mut self, input: &InputSnapshot) -> Vec<RescueEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }

        self.move_agent(input);
        self.record_trail();
        self.move_hazards();

        // Being caught supersedes everything else this frame.
        if self.agent_caught() {
            self.lose_life(&mut events);
            return events;
        }

        self.sever_lines(&mut events);
        self.try_pickup(&mut events);
        self.try_deliver(&mut events);
        events
    }

    fn move_agent(&mut self, input: &InputSnapshot) {
        let cfg = &self.config;
        if !input.boost {
            self.boost_spent = false;
        } else if self.agent.stamina <= 0.0 {
            self.boost_spent = true;
        }
        let boosting = input.boost && !self.boost_spent;
        let speed = if boosting { cfg.boost_speed } else { cfg.base_speed };
        if boosting {
            self.agent.stamina = (self.agent.stamina - cfg.stamina_drain).max(0.0);
        } else {
            self.agent.stamina = (self.agent.stamina + cfg.stamina_regen).min(cfg.stamina_max);
        }
        self.agent.boosting = boosting;

        let (mut dx, mut dy) = (0.0, 0.0);
        if input.any_direction() {
            // Axes are independent: diagonals move `speed` on both.
            if input.up {
                dy -= speed;
            }
            if input.down {
                dy += speed;
            }
            if input.left {
                dx -= speed;
            }
            if input.right {
                dx += speed;
            }
        } else if let Some(target) = input.target {
            let dist = self.agent.pos.distance(target);
            if dist > f64::EPSILON {
                let step = speed.min(dist);
                dx = (target.x - self.agent.pos.x) / dist * step;
                dy = (target.y - self.agent.pos.y) / dist * step;
            }
        }

        if dx < 0.0 {
            self.agent.facing = Facing::Left;
        } else if dx > 0.0 {
            self.agent.facing = Facing::Right;
        }
        let moved = Point::new(self.agent.pos.x + dx, self.agent.pos.y + dy);
        self.agent.pos = moved.clamp(cfg.agent_inset, cfg.field_size - cfg.agent_inset);
    }

    fn record_trail(&mut self) {
        self.trail.push_front(self.agent.pos);
        self.trail.truncate(self.config.trail_cap);
    }

    fn move_hazards(&mut self) {
        for (hazard, cfg) in self.hazards.iter_mut().zip(&self.config.hazards) {
            hazard.pos.x += cfg.speed;
            if cfg.has_exited(hazard.pos.x) {
                hazard.pos.x = cfg.reenter_x;
                hazard.pos.y = uniform(&mut self.rng, cfg.lane_min_y, cfg.lane_max_y);
            }
        }
    }

    fn agent_caught(&self) -> bool {
        self.hazards.iter().zip(&self.config.hazards).any(|(hazard, cfg)| {
            cfg.lethal_radius
                .is_some_and(|r| self.agent.pos.distance(hazard.pos) < r)
        })
    }

    fn lose_life(&mut self, events: &mut Vec<RescueEvent>) {
        match self.lives {
            Some(left) if left > 1 => {
                self.lives = Some(left - 1);
                self.agent.pos = self.config.agent_start;
                for (hazard, cfg) in self.hazards.iter_mut().zip(&self.config.hazards) {
                    hazard.pos.x = cfg.respawn_x;
                }
                info!("[Rescue] caught, {} lives left", left - 1);
                events.push(RescueEvent::LifeLost { lives_left: left - 1 });
            }
            _ => {
                self.lives = self.lives.map(|_| 0);
                self.end_session(events);
            }
        }
    }

    fn end_session(&mut self, events: &mut Vec<RescueEvent>) {
        self.phase = Phase::Ended;
        self.record_high_score(events);
        info!(
            "[Rescue] game over: score {}, casualties {}",
            self.score, self.casualties
        );
        events.push(RescueEvent::GameOver { score: self.score });
    }

    /// Each severing hazard bites the line at most once per frame: scanning from
    /// the tail, the first duckling within reach is lost together with everyone
    /// behind it. Hazards that eat ducklings bite before the ones that only cut
    /// the line, whatever their order in the config.
    fn sever_lines(&mut self, events: &mut Vec<RescueEvent>) {
        let mut order: Vec<usize> = (0..self.hazards.len()).collect();
        order.sort_by_key(|&i| !self.config.hazards[i].eats_ducklings);
        for i in order {
            let hazard = self.hazards[i];
            let cfg = &self.config.hazards[i];
            let Some(radius) = cfg.sever_radius else { continue };
            let Some(rank) = self.bitten_rank(hazard.pos, radius) else { continue };
            let lost = self.followers - rank;
            self.followers = rank;
            if cfg.eats_ducklings {
                self.casualties += lost as u32;
            }
            debug!("[Rescue] {} cut the line at rank {rank}, {lost} lost", cfg.name);
            events.push(RescueEvent::Severed {
                hazard: cfg.name.clone(),
                lost,
                eaten: cfg.eats_ducklings,
            });
        }
    }

    fn bitten_rank(&self, at: Point, radius: f64) -> Option<usize> {
        (0..self.followers).rev().find(|&rank| {
            self.follower_position(rank)
                .is_some_and(|p| p.distance(at) < radius)
        })
    }

    fn try_pickup(&mut self, events: &mut Vec<RescueEvent>) {
        if self.followers >= self.config.max_followers() {
            return;
        }
        if self.agent.pos.distance(self.collectible) < self.config.pickup_radius {
            self.followers += 1;
            self.respawn_collectible();
            events.push(RescueEvent::Rescued { followers: self.followers });
        }
    }

    fn try_deliver(&mut self, events: &mut Vec<RescueEvent>) {
        if self.followers == 0
            || self.agent.pos.distance(self.config.nest) >= self.config.nest_radius
        {
            return;
        }
        let count = self.followers;
        self.score += count as u32;
        self.followers = 0;
        debug!("[Rescue] delivered {count}, score {}", self.score);
        events.push(RescueEvent::Delivered { count });
        self.record_high_score(events);
    }

    fn record_high_score(&mut self, events: &mut Vec<RescueEvent>) {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store
                .save_high_score(&self.config.high_score_key, self.high_score);
            events.push(RescueEvent::NewHighScore(self.high_score));
        }
    }

    fn respawn_collectible(&mut self) {
        let (lo, hi) = (
            self.config.spawn_margin,
            self.config.field_size - self.config.spawn_margin,
        );
        self.collectible = Point::new(uniform(&mut self.rng, lo, hi), uniform(&mut self.rng, lo, hi));
    }

    // --- Read-only views (render, HUD) ------------------------------------------

    pub fn config(&self) -> &RescueConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn trail(&self) -> &VecDeque<Point> {
        &self.trail
    }

    pub fn followers(&self) -> usize {
        self.followers
    }

    /// Where duckling `rank` is drawn, if the trail is already long enough.
    pub fn follower_position(&self, rank: usize) -> Option<Point> {
        self.trail.get(self.config.trail_slot(rank)).copied()
    }

    pub fn collectible(&self) -> Point {
        self.collectible
    }

    pub fn hazards(&self) -> impl Iterator<Item = (&Hazard, &HazardConfig)> {
        self.hazards.iter().zip(&self.config.hazards)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn lives(&self) -> Option<u32> {
        self.lives
    }

    pub fn casualties(&self) -> u32 {
        self.casualties
    }

    /// Boost meter fill, 0.0..=1.0.
    pub fn stamina_fraction(&self) -> f64 {
        if self.config.stamina_max <= 0.0 {
            return 0.0;
        }
        self.agent.stamina / self.config.stamina_max
    }
}

/// Uniform draw in `[lo, hi]`; a degenerate range yields `lo`.
fn uniform(rng: &mut SmallRng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..=hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn quiet_config() -> RescueConfig {
        RescueConfig { hazards: Vec::new(), ..RescueConfig::default() }
    }

    fn running(config: RescueConfig) -> RescueGame<MemoryStore> {
        let mut game = RescueGame::new(config, MemoryStore::new(), 7);
        game.start();
        game
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    /// Fill the trail so every slot holds `p`.
    fn fill_trail(game: &mut RescueGame<MemoryStore>, p: Point) {
        game.trail = std::iter::repeat(p).take(game.config.trail_cap).collect();
    }

    #[test]
    fn tick_is_inert_until_started() {
        let mut game = RescueGame::new(quiet_config(), MemoryStore::new(), 1);
        let before = game.agent;
        let events = game.tick(&InputSnapshot { left: true, ..idle() });
        assert!(events.is_empty());
        assert_eq!(game.agent, before);
        assert!(game.trail.is_empty());
    }

    #[test]
    fn pause_freezes_and_resumes() {
        let mut game = running(quiet_config());
        game.toggle_pause();
        assert_eq!(game.phase(), Phase::Paused);
        game.tick(&InputSnapshot { right: true, ..idle() });
        assert_eq!(game.agent.pos, game.config.agent_start);
        game.toggle_pause();
        assert_eq!(game.phase(), Phase::Running);
        game.tick(&InputSnapshot { right: true, ..idle() });
        assert_eq!(game.agent.pos.x, 203.0);
    }

    #[test]
    fn boost_drains_then_regenerates() {
        let mut game = running(quiet_config());
        let boost = InputSnapshot { right: true, boost: true, ..idle() };
        game.tick(&boost);
        assert_eq!(game.agent.pos.x, 207.0);
        assert_eq!(game.agent.stamina, 98.5);
        assert!(game.agent.boosting);

        game.agent.stamina = 1.0;
        game.tick(&boost);
        assert_eq!(game.agent.stamina, 0.0);
        let x = game.agent.pos.x;
        game.tick(&boost);
        // exhausted: base speed, regenerating
        assert_eq!(game.agent.pos.x, x + 3.0);
        assert_eq!(game.agent.stamina, 0.5);
        assert!(!game.agent.boosting);

        // still held: stays off while the meter refills
        for _ in 0..5 {
            let x = game.agent.pos.x;
            game.tick(&boost);
            assert!(!game.agent.boosting);
            assert_eq!(game.agent.pos.x, x + 3.0);
        }
        assert_eq!(game.agent.stamina, 3.0);

        // release and press again to re-arm
        game.tick(&InputSnapshot { right: true, ..idle() });
        assert_eq!(game.agent.stamina, 3.5);
        let x = game.agent.pos.x;
        game.tick(&boost);
        assert!(game.agent.boosting);
        assert_eq!(game.agent.pos.x, x + 7.0);
        assert_eq!(game.agent.stamina, 2.0);
    }

    #[test]
    fn oversized_inset_pins_agent_instead_of_panicking() {
        let config = RescueConfig { agent_inset: 250.0, ..quiet_config() };
        let mut game = running(config);
        game.tick(&InputSnapshot { left: true, ..idle() });
        assert_eq!(game.agent.pos, Point::new(150.0, 150.0));
    }

    #[test]
    fn facing_follows_last_horizontal_move() {
        let mut game = running(quiet_config());
        game.tick(&InputSnapshot { left: true, ..idle() });
        assert_eq!(game.agent.facing, Facing::Left);
        game.tick(&InputSnapshot { up: true, ..idle() });
        assert_eq!(game.agent.facing, Facing::Left);
        game.tick(&InputSnapshot { right: true, ..idle() });
        assert_eq!(game.agent.facing, Facing::Right);
    }

    #[test]
    fn pointer_target_is_approached_without_overshoot() {
        let mut game = running(quiet_config());
        let target = Point::new(202.0, 200.0);
        game.tick(&InputSnapshot { target: Some(target), ..idle() });
        assert_eq!(game.agent.pos, target);
        game.tick(&InputSnapshot { target: Some(target), ..idle() });
        assert_eq!(game.agent.pos, target);
    }

    #[test]
    fn delivery_scenario_scores_followers() {
        let mut game = running(quiet_config());
        game.score = 10;
        game.high_score = 12;
        game.followers = 3;
        game.agent.pos = game.config.nest;
        game.collectible = Point::new(40.0, 380.0);
        let events = game.tick(&idle());
        assert_eq!(game.score(), 13);
        assert_eq!(game.followers(), 0);
        assert_eq!(game.high_score(), 13);
        assert!(events.contains(&RescueEvent::Delivered { count: 3 }));
        assert!(events.contains(&RescueEvent::NewHighScore(13)));
        assert_eq!(game.store.load_high_score("duckRescueHighScore"), 13);
    }

    #[test]
    fn empty_line_at_nest_scores_nothing() {
        let mut game = running(quiet_config());
        game.agent.pos = game.config.nest;
        game.collectible = Point::new(40.0, 380.0);
        let events = game.tick(&idle());
        assert_eq!(game.score(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn pike_wraps_to_far_side_with_new_lane() {
        let config = RescueConfig {
            hazards: vec![HazardConfig::pike()],
            ..RescueConfig::default()
        };
        let mut game = running(config);
        game.hazards[0].pos = Point::new(451.0, 150.0);
        game.tick(&idle());
        let pos = game.hazards[0].pos;
        assert_eq!(pos.x, -50.0);
        assert!((50.0..=350.0).contains(&pos.y));
    }

    #[test]
    fn crocodile_on_last_life_ends_session() {
        let config = RescueConfig {
            hazards: vec![HazardConfig::crocodile()],
            lives: Some(1),
            ..RescueConfig::default()
        };
        let mut game = running(config);
        game.score = 4;
        game.hazards[0].pos = Point::new(225.0, 200.0);
        let events = game.tick(&idle());
        assert_eq!(game.phase(), Phase::Ended);
        assert_eq!(game.lives(), Some(0));
        assert!(events.contains(&RescueEvent::GameOver { score: 4 }));
        assert!(events.contains(&RescueEvent::NewHighScore(4)));
        // frozen afterwards
        assert!(game.tick(&InputSnapshot { up: true, ..idle() }).is_empty());
    }

    #[test]
    fn crocodile_with_lives_left_resets_positions() {
        let config = RescueConfig {
            hazards: vec![HazardConfig::crocodile()],
            ..RescueConfig::default()
        };
        let mut game = running(config);
        game.agent.pos = Point::new(100.0, 100.0);
        game.hazards[0].pos = Point::new(101.2, 110.0);
        game.followers = 2;
        fill_trail(&mut game, Point::new(100.0, 100.0));
        let events = game.tick(&idle());
        assert_eq!(events, vec![RescueEvent::LifeLost { lives_left: 4 }]);
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.agent.pos, game.config.agent_start);
        assert_eq!(game.hazards[0].pos.x, 500.0);
        // severance and pickup were skipped
        assert_eq!(game.followers(), 2);
    }

    #[test]
    fn lethal_hit_without_lives_is_game_over() {
        let config = RescueConfig {
            hazards: vec![HazardConfig::crocodile()],
            lives: None,
            ..RescueConfig::default()
        };
        let mut game = running(config);
        game.hazards[0].pos = Point::new(201.2, 200.0);
        game.tick(&idle());
        assert_eq!(game.phase(), Phase::Ended);
        assert_eq!(game.lives(), None);
    }

    #[test]
    fn pike_bite_keeps_ducklings_ahead_of_it() {
        let config = RescueConfig {
            hazards: vec![HazardConfig { speed: 0.0, ..HazardConfig::pike() }],
            ..RescueConfig::default()
        };
        let mut game = running(config);
        game.collectible = Point::new(380.0, 380.0);
        // trail after this tick: [agent, then the prepared history]
        let mut trail: VecDeque<Point> =
            (0..299).map(|i| Point::new(200.0, 200.0 - i as f64)).collect();
        // rank 4 sits at index 75 after the tick pushes one sample
        trail[74] = Point::new(50.0, 50.0);
        trail[119] = Point::new(50.0, 55.0); // rank 7, also in reach
        game.trail = trail;
        game.followers = 9;
        game.hazards[0].pos = Point::new(50.0, 52.0);
        game.casualties = 0;
        let events = game.tick(&idle());
        // scanning from the tail finds rank 7 first
        assert_eq!(game.followers(), 7);
        assert_eq!(game.casualties(), 0);
        assert_eq!(
            events,
            vec![RescueEvent::Severed { hazard: "pike".into(), lost: 2, eaten: false }]
        );
    }

    #[test]
    fn crocodile_bite_counts_casualties() {
        let config = RescueConfig {
            hazards: vec![HazardConfig { speed: 0.0, ..HazardConfig::crocodile() }],
            ..RescueConfig::default()
        };
        let mut game = running(config);
        game.collectible = Point::new(380.0, 380.0);
        fill_trail(&mut game, Point::new(300.0, 300.0));
        game.hazards[0].pos = Point::new(310.0, 300.0);
        game.followers = 5;
        game.tick(&idle());
        // every slot is in reach, so the tail-first scan stops at rank 4
        assert_eq!(game.followers(), 4);
        assert_eq!(game.casualties(), 1);
    }

    #[test]
    fn crocodile_eats_before_pike_cuts_in_the_same_tick() {
        // default order lists the pike first
        let config = RescueConfig {
            hazards: vec![
                HazardConfig { speed: 0.0, ..HazardConfig::pike() },
                HazardConfig { speed: 0.0, ..HazardConfig::crocodile() },
            ],
            ..RescueConfig::default()
        };
        let mut game = running(config);
        game.collectible = Point::new(380.0, 380.0);
        let mut trail: VecDeque<Point> =
            (0..299).map(|i| Point::new(200.0, 200.0 - i as f64)).collect();
        trail[44] = Point::new(50.0, 50.0); // rank 2 after the tick
        trail[74] = Point::new(350.0, 350.0); // rank 4 after the tick
        game.trail = trail;
        game.followers = 5;
        game.hazards[0].pos = Point::new(50.0, 50.0);
        game.hazards[1].pos = Point::new(350.0, 350.0);
        let events = game.tick(&idle());
        assert_eq!(game.followers(), 2);
        assert_eq!(game.casualties(), 1);
        assert_eq!(
            events,
            vec![
                RescueEvent::Severed { hazard: "crocodile".into(), lost: 1, eaten: true },
                RescueEvent::Severed { hazard: "pike".into(), lost: 2, eaten: false },
            ]
        );
        // drawing still follows config order
        let names: Vec<&str> = game.hazards().map(|(_, cfg)| cfg.name.as_str()).collect();
        assert_eq!(names, ["pike", "crocodile"]);
    }

    #[test]
    fn short_trail_hides_followers_from_hazards() {
        let config = RescueConfig {
            hazards: vec![HazardConfig { speed: 0.0, ..HazardConfig::pike() }],
            ..RescueConfig::default()
        };
        let mut game = running(config);
        game.collectible = Point::new(380.0, 380.0);
        game.followers = 3;
        game.hazards[0].pos = game.config.agent_start;
        game.tick(&idle());
        assert_eq!(game.trail().len(), 1);
        assert_eq!(game.follower_position(0), None);
        assert_eq!(game.followers(), 3);
    }

    #[test]
    fn pickup_once_per_tick_and_respawns() {
        let config = RescueConfig { spawn_margin: 200.0, ..quiet_config() };
        let mut game = running(config);
        assert_eq!(game.collectible(), Point::new(200.0, 200.0));
        game.tick(&idle());
        assert_eq!(game.followers(), 1);
        game.tick(&idle());
        assert_eq!(game.followers(), 2);
    }

    #[test]
    fn pickup_respawns_somewhere_new_inside_the_margin() {
        let mut game = running(quiet_config());
        let (lo, hi) = (40.0, 360.0);
        let agent = game.agent.pos;
        for n in 1..=game.config.max_followers() {
            game.collectible = agent;
            let events = game.tick(&idle());
            assert_eq!(events, vec![RescueEvent::Rescued { followers: n }]);
            let spot = game.collectible();
            assert_ne!(spot, agent);
            assert!((lo..=hi).contains(&spot.x) && (lo..=hi).contains(&spot.y), "{spot:?}");

            // a second tick in place only picks up if the new spot landed in reach
            if n < game.config.max_followers() {
                let in_reach = agent.distance(spot) < game.config.pickup_radius;
                game.tick(&idle());
                assert_eq!(game.followers(), n + usize::from(in_reach));
                game.followers = n;
            }
        }
    }

    #[test]
    fn full_line_stops_pickups() {
        let config = RescueConfig { spawn_margin: 200.0, ..quiet_config() };
        let mut game = running(config);
        game.followers = game.config.max_followers();
        let events = game.tick(&idle());
        assert!(events.is_empty());
        assert_eq!(game.followers(), 19);
    }

    #[test]
    fn start_resets_session() {
        let mut game = running(quiet_config());
        game.score = 9;
        game.followers = 4;
        game.casualties = 2;
        game.lives = Some(1);
        game.tick(&InputSnapshot { left: true, boost: true, ..idle() });
        game.start();
        assert_eq!(game.score(), 0);
        assert_eq!(game.followers(), 0);
        assert_eq!(game.casualties(), 0);
        assert_eq!(game.lives(), Some(5));
        assert!(game.trail().is_empty());
        assert_eq!(game.agent.stamina, 100.0);
        assert_eq!(game.agent.pos, game.config.agent_start);
    }
}
