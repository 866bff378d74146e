//! Entity store, simulation step and collision resolver.
//!
//! One [`Game`] owns every piece of gameplay state. Each call to
//! [`Game::step`] is one tick: move the ship, fire, advance bullets and
//! enemies, then resolve hits.

use embedded_graphics::prelude::Point;

use crate::{
    input::Intents,
    rng::RandomSource,
    slots::Slots,
};

// ── Geometry ────────────────────────────────────────────────────────────────
pub const SCREEN_WIDTH: i32 = 128;
pub const SCREEN_HEIGHT: i32 = 64;

pub const SHIP_SIZE: i32 = 10;
pub const ENEMY_WIDTH: i32 = 8;
pub const ENEMY_HEIGHT: i32 = 10;

pub const SHIP_MAX_X: i32 = SCREEN_WIDTH - SHIP_SIZE;
pub const SHIP_MAX_Y: i32 = SCREEN_HEIGHT - SHIP_SIZE;

/// Respawned enemies get a height in `0..RESPAWN_SPAN`.
pub const RESPAWN_SPAN: i32 = SCREEN_HEIGHT - ENEMY_HEIGHT;

// ── Tuning ──────────────────────────────────────────────────────────────────
pub const MAX_BULLETS: usize = 10;
pub const MAX_ENEMIES: usize = 100;
pub const DEFAULT_ENEMY_COUNT: usize = 50;

pub const SHIP_SPEED: i32 = 1;
pub const BULLET_SPEED: i32 = 2;
pub const ENEMY_SPEED: i32 = 1;

pub const SHIP_START: Point = Point::new(10, 32);
/// Where a bullet appears relative to the ship's top-left corner.
pub const MUZZLE: Point = Point::new(SHIP_SIZE, SHIP_SIZE / 2);

// ── Entity types ────────────────────────────────────────────────────────────
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ship {
    pub pos: Point,
}

impl Default for Ship {
    fn default() -> Self {
        Self { pos: SHIP_START }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bullet {
    pub pos: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Enemy {
    pub pos: Point,
}

impl Enemy {
    /// Staggered start position for slot `index`. Most of these start far
    /// off-screen and only enter play after their first wrap.
    pub const fn staggered(index: usize) -> Self {
        let i = index as i32;
        Self {
            pos: Point::new(100 + i * 20, 10 + i * 15),
        }
    }
}

/// Hit test: the bullet has reached the enemy's left edge and lies within
/// its vertical extent, both ends inclusive.
pub const fn hit_test(bullet: Point, enemy: Point) -> bool {
    bullet.x >= enemy.x && bullet.y >= enemy.y && bullet.y <= enemy.y + ENEMY_HEIGHT
}

// ── Configuration ───────────────────────────────────────────────────────────
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Number of enemy slots that take part, `0..=MAX_ENEMIES`.
    pub enemy_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enemy_count: DEFAULT_ENEMY_COUNT,
        }
    }
}

impl GameConfig {
    pub const fn with_enemy_count(enemy_count: usize) -> Self {
        Self {
            enemy_count: if enemy_count > MAX_ENEMIES {
                MAX_ENEMIES
            } else {
                enemy_count
            },
        }
    }
}

/// What happened during one tick, for audio and LED feedback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub fired: bool,
    pub hits: u8,
}

// ── Game state ──────────────────────────────────────────────────────────────
pub struct Game<R> {
    ship: Ship,
    pub(crate) bullets: Slots<Bullet, MAX_BULLETS>,
    pub(crate) enemies: Slots<Enemy, MAX_ENEMIES>,
    score: u32,
    enemy_count: usize,
    ticks: u32,
    rng: R,
}

impl<R: RandomSource> Game<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        let mut game = Self {
            ship: Ship::default(),
            bullets: Slots::new(),
            enemies: Slots::new(),
            score: 0,
            enemy_count: 0,
            ticks: 0,
            rng,
        };
        game.restart(config);
        game
    }

    /// Reset every entity for a new round. The random source keeps its state.
    pub fn restart(&mut self, config: GameConfig) {
        let config = GameConfig::with_enemy_count(config.enemy_count);
        self.ship = Ship::default();
        self.bullets.clear();
        self.enemies.clear();
        for i in 0..MAX_ENEMIES {
            self.enemies.activate(i, Enemy::staggered(i));
        }
        self.score = 0;
        self.enemy_count = config.enemy_count;
        self.ticks = 0;
        info!("new game with {} enemies", self.enemy_count);
    }

    pub const fn ship(&self) -> &Ship {
        &self.ship
    }

    pub const fn bullets(&self) -> &Slots<Bullet, MAX_BULLETS> {
        &self.bullets
    }

    pub const fn enemies(&self) -> &Slots<Enemy, MAX_ENEMIES> {
        &self.enemies
    }

    /// Enemies taking part in this round: active and inside the configured
    /// prefix.
    pub fn participating_enemies(&self) -> impl Iterator<Item = (usize, &Enemy)> {
        let count = self.enemy_count;
        self.enemies.iter().take_while(move |(i, _)| *i < count)
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn enemy_count(&self) -> usize {
        self.enemy_count
    }

    /// Ticks simulated since the last restart.
    pub const fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Advance the whole game by one tick.
    pub fn step(&mut self, intents: Intents) -> TickReport {
        self.move_ship(intents);
        let fired = intents.fire && self.fire();
        self.advance_bullets();
        self.advance_enemies();
        let hits = self.resolve_collisions();
        self.ticks = self.ticks.wrapping_add(1);
        TickReport { fired, hits }
    }

    /// Move one pixel per active axis, clamped to the screen.
    pub fn move_ship(&mut self, intents: Intents) {
        let pos = &mut self.ship.pos;
        pos.x = (pos.x + i32::from(intents.dx) * SHIP_SPEED).clamp(0, SHIP_MAX_X);
        pos.y = (pos.y + i32::from(intents.dy) * SHIP_SPEED).clamp(0, SHIP_MAX_Y);
    }

    /// Claim the first free bullet slot at the ship's muzzle. Returns `false`
    /// when all slots are busy; the shot is dropped.
    pub fn fire(&mut self) -> bool {
        let bullet = Bullet {
            pos: self.ship.pos + MUZZLE,
        };
        match self.bullets.claim(bullet) {
            Some(slot) => {
                trace!("bullet {} fired", slot);
                true
            }
            None => false,
        }
    }

    pub fn advance_bullets(&mut self) {
        let mut gone: u16 = 0;
        for (i, bullet) in self.bullets.iter_mut() {
            bullet.pos.x += BULLET_SPEED;
            if bullet.pos.x > SCREEN_WIDTH {
                gone |= 1 << i;
            }
        }
        for i in 0..MAX_BULLETS {
            if gone & (1 << i) != 0 {
                self.bullets.release(i);
            }
        }
    }

    /// Move participating enemies left; any that leave the screen re-enter
    /// from the right edge at a random height.
    pub fn advance_enemies(&mut self) {
        let count = self.enemy_count;
        let rng = &mut self.rng;
        for (_, enemy) in self.enemies.iter_mut().take_while(|(i, _)| *i < count) {
            enemy.pos.x -= ENEMY_SPEED;
            if enemy.pos.x < 0 {
                enemy.pos.x = SCREEN_WIDTH;
                enemy.pos.y = rng.below(RESPAWN_SPAN as u32) as i32;
            }
        }
    }

    /// Sweep every active bullet against the participating enemies. A bullet
    /// stops at its first hit, so it can score at most once per tick.
    pub fn resolve_collisions(&mut self) -> u8 {
        let mut hits = 0u8;
        for b in 0..MAX_BULLETS {
            let Some(&bullet) = self.bullets.get(b) else {
                continue;
            };
            for e in 0..self.enemy_count {
                let Some(&enemy) = self.enemies.get(e) else {
                    continue;
                };
                if hit_test(bullet.pos, enemy.pos) {
                    self.bullets.release(b);
                    self.enemies.release(e);
                    self.score = self.score.saturating_add(1);
                    hits = hits.saturating_add(1);
                    debug!("enemy {} down, score {}", e, self.score);
                    break;
                }
            }
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rng::Rng,
        testing::Script,
    };

    fn quiet_game(enemy_count: usize) -> Game<Rng> {
        Game::new(GameConfig::with_enemy_count(enemy_count), Rng::new(1))
    }

    fn hold(dx: i8, dy: i8) -> Intents {
        Intents {
            dx,
            dy,
            fire: false,
        }
    }

    #[test]
    fn starts_staggered() {
        let game = quiet_game(50);
        assert_eq!(game.ship().pos, SHIP_START);
        assert_eq!(game.score(), 0);
        assert_eq!(game.bullets().active_count(), 0);
        assert_eq!(game.enemies().active_count(), MAX_ENEMIES);
        assert_eq!(game.enemies().get(0).unwrap().pos, Point::new(100, 10));
        assert_eq!(game.enemies().get(3).unwrap().pos, Point::new(160, 55));
        assert_eq!(game.participating_enemies().count(), 50);
    }

    #[test]
    fn enemy_count_is_clamped() {
        assert_eq!(GameConfig::with_enemy_count(250).enemy_count, MAX_ENEMIES);
        assert_eq!(quiet_game(1000).enemy_count(), MAX_ENEMIES);
    }

    #[test]
    fn ship_stays_on_screen() {
        let mut game = quiet_game(0);
        for _ in 0..300 {
            game.step(hold(1, 1));
            assert!((0..=SHIP_MAX_X).contains(&game.ship().pos.x));
            assert!((0..=SHIP_MAX_Y).contains(&game.ship().pos.y));
        }
        assert_eq!(game.ship().pos, Point::new(118, 54));

        for _ in 0..300 {
            game.step(hold(-1, -1));
        }
        assert_eq!(game.ship().pos, Point::new(0, 0));
    }

    #[test]
    fn ship_moves_one_pixel_per_axis() {
        let mut game = quiet_game(0);
        game.move_ship(hold(1, 0));
        assert_eq!(game.ship().pos, Point::new(11, 32));
        game.move_ship(hold(0, -1));
        assert_eq!(game.ship().pos, Point::new(11, 31));
        game.move_ship(Intents::NONE);
        assert_eq!(game.ship().pos, Point::new(11, 31));
    }

    #[test]
    fn eleventh_shot_is_dropped() {
        let mut game = quiet_game(0);
        for _ in 0..10 {
            assert!(game.fire());
        }
        let before: heapless::Vec<(usize, Bullet), MAX_BULLETS> =
            game.bullets().iter().map(|(i, b)| (i, *b)).collect();

        assert!(!game.fire());
        assert_eq!(game.bullets().active_count(), MAX_BULLETS);
        let after: heapless::Vec<(usize, Bullet), MAX_BULLETS> =
            game.bullets().iter().map(|(i, b)| (i, *b)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn bullet_spawns_at_muzzle_and_flies_right() {
        let mut game = quiet_game(0);
        let report = game.step(Intents {
            fire: true,
            ..Intents::NONE
        });
        assert!(report.fired);
        // Spawned at (20, 37) then advanced in the same tick.
        assert_eq!(game.bullets().get(0).unwrap().pos, Point::new(22, 37));
        game.advance_bullets();
        assert_eq!(game.bullets().get(0).unwrap().pos, Point::new(24, 37));
    }

    #[test]
    fn bullet_expires_past_right_edge() {
        let mut game = quiet_game(0);
        game.bullets.activate(0, Bullet {
            pos: Point::new(126, 5),
        });
        game.advance_bullets();
        // x == 128 is still on the edge.
        assert!(game.bullets().is_active(0));
        game.advance_bullets();
        assert!(!game.bullets().is_active(0));
        for _ in 0..10 {
            game.step(Intents::NONE);
            assert!(!game.bullets().is_active(0));
        }
    }

    #[test]
    fn freed_slot_is_reused_first() {
        let mut game = quiet_game(0);
        for _ in 0..3 {
            game.fire();
        }
        game.bullets.release(1);
        game.fire();
        assert!(game.bullets().is_active(1));
        assert_eq!(game.bullets().active_count(), 3);
    }

    #[test]
    fn enemies_wrap_with_injected_height() {
        let mut game = Game::new(GameConfig::with_enemy_count(1), Script::new(&[57]));
        game.enemies.activate(0, Enemy {
            pos: Point::new(0, 20),
        });
        game.advance_enemies();
        assert_eq!(game.enemies().get(0).unwrap().pos, Point::new(128, 57 % 54));
        game.advance_enemies();
        assert_eq!(game.enemies().get(0).unwrap().pos, Point::new(127, 3));
    }

    #[test]
    fn respawn_height_in_range() {
        let mut game = quiet_game(MAX_ENEMIES);
        for _ in 0..20 {
            for i in 0..MAX_ENEMIES {
                game.enemies.activate(i, Enemy {
                    pos: Point::new(0, 500),
                });
            }
            game.advance_enemies();
            for (_, enemy) in game.participating_enemies() {
                assert_eq!(enemy.pos.x, SCREEN_WIDTH);
                assert!((0..RESPAWN_SPAN).contains(&enemy.pos.y));
            }
        }
    }

    #[test]
    fn only_prefix_enemies_move() {
        let mut game = quiet_game(2);
        game.advance_enemies();
        assert_eq!(game.enemies().get(0).unwrap().pos.x, 99);
        assert_eq!(game.enemies().get(1).unwrap().pos.x, 119);
        assert_eq!(game.enemies().get(2).unwrap().pos.x, 140);
    }

    #[test]
    fn direct_hit_scores_once() {
        let mut game = quiet_game(1);
        game.enemies.activate(0, Enemy {
            pos: Point::new(5, 30),
        });
        game.bullets.activate(0, Bullet {
            pos: Point::new(5, 30),
        });
        assert_eq!(game.resolve_collisions(), 1);
        assert!(!game.enemies().is_active(0));
        assert!(!game.bullets().is_active(0));
        assert_eq!(game.score(), 1);

        assert_eq!(game.resolve_collisions(), 0);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn hit_test_edges() {
        let enemy = Point::new(40, 20);
        assert!(hit_test(Point::new(40, 20), enemy));
        assert!(hit_test(Point::new(90, 30), enemy));
        assert!(!hit_test(Point::new(39, 25), enemy));
        assert!(!hit_test(Point::new(45, 19), enemy));
        assert!(!hit_test(Point::new(45, 31), enemy));
    }

    #[test]
    fn bullet_hits_at_most_one_enemy_per_tick() {
        let mut game = quiet_game(3);
        game.enemies.activate(0, Enemy {
            pos: Point::new(30, 10),
        });
        game.enemies.activate(1, Enemy {
            pos: Point::new(32, 12),
        });
        game.enemies.activate(2, Enemy {
            pos: Point::new(34, 14),
        });
        game.bullets.activate(4, Bullet {
            pos: Point::new(40, 15),
        });

        assert_eq!(game.resolve_collisions(), 1);
        assert_eq!(game.score(), 1);
        assert!(!game.enemies().is_active(0));
        assert!(game.enemies().is_active(1));
        assert!(game.enemies().is_active(2));
    }

    #[test]
    fn two_bullets_two_hits() {
        let mut game = quiet_game(2);
        game.enemies.activate(0, Enemy {
            pos: Point::new(30, 10),
        });
        game.enemies.activate(1, Enemy {
            pos: Point::new(30, 40),
        });
        game.bullets.activate(0, Bullet {
            pos: Point::new(31, 12),
        });
        game.bullets.activate(1, Bullet {
            pos: Point::new(31, 45),
        });
        assert_eq!(game.resolve_collisions(), 2);
        assert_eq!(game.score(), 2);
        assert_eq!(game.participating_enemies().count(), 0);
    }

    #[test]
    fn enemies_outside_prefix_cannot_be_hit() {
        let mut game = quiet_game(1);
        game.enemies.activate(1, Enemy {
            pos: Point::new(5, 30),
        });
        game.enemies.activate(0, Enemy {
            pos: Point::new(120, 0),
        });
        game.bullets.activate(0, Bullet {
            pos: Point::new(6, 31),
        });
        assert_eq!(game.resolve_collisions(), 0);
        assert!(game.enemies().is_active(1));
    }

    #[test]
    fn no_enemies_no_score() {
        let mut game = quiet_game(0);
        let fire = Intents {
            fire: true,
            ..Intents::NONE
        };
        for _ in 0..1000 {
            let report = game.step(fire);
            assert_eq!(report.hits, 0);
        }
        assert_eq!(game.score(), 0);
        assert_eq!(game.ticks(), 1000);
    }

    #[test]
    fn score_never_decreases() {
        let mut game = Game::new(GameConfig::with_enemy_count(MAX_ENEMIES), Rng::new(99));
        let mut last = 0;
        for t in 0..5000u32 {
            let intents = Intents {
                dx: 0,
                dy: if (t / 60) % 2 == 0 { 1 } else { -1 },
                fire: true,
            };
            game.step(intents);
            assert!(game.score() >= last);
            assert!(game.bullets().active_count() <= MAX_BULLETS);
            last = game.score();
        }
        assert!(last > 0);
    }

    #[test]
    fn restart_resets_round_but_not_rng() {
        let mut game = Game::new(GameConfig::with_enemy_count(5), Rng::new(3));
        for _ in 0..400 {
            game.step(Intents {
                fire: true,
                ..Intents::NONE
            });
        }
        game.restart(GameConfig::with_enemy_count(7));
        assert_eq!(game.score(), 0);
        assert_eq!(game.ticks(), 0);
        assert_eq!(game.enemy_count(), 7);
        assert_eq!(game.ship().pos, SHIP_START);
        assert_eq!(game.bullets().active_count(), 0);
        assert_eq!(game.enemies().get(6).unwrap().pos, Point::new(220, 100));
    }
}
