//! Game loop driver.
//!
//! [`App`] sequences one tick of whatever mode is active: menu polling, or
//! sample → simulate → collide for gameplay. It reports side effects as
//! [`Event`]s and leaves audio, LEDs and the panel flush to the firmware.

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::DrawTarget,
};
use heapless::Vec;

use crate::{
    game::{
        Game,
        GameConfig,
        MAX_BULLETS,
    },
    input::{
        Intents,
        RawInput,
    },
    menu::{
        Menu,
        MenuAction,
        Page,
    },
    render,
    rng::RandomSource,
    sound::Sound,
};

/// Button B must be released and pressed again, with this much time in
/// between, to toggle pause.
pub const PAUSE_QUIET_MS: u64 = 200;

/// The busiest tick: a shot, a hit per bullet and a mode change.
pub const MAX_EVENTS: usize = MAX_BULLETS + 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Menu,
    Playing,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Play(Sound),
    Mode(Mode),
}

pub type Events = Vec<Event, MAX_EVENTS>;

pub struct App<R> {
    mode: Mode,
    menu: Menu,
    game: Game<R>,
    pause_held: bool,
    pause_quiet_until_ms: u64,
}

impl<R: RandomSource> App<R> {
    pub fn new(rng: R) -> Self {
        Self {
            mode: Mode::Menu,
            menu: Menu::default(),
            game: Game::new(GameConfig::default(), rng),
            pause_held: false,
            pause_quiet_until_ms: 0,
        }
    }

    /// Events to emit once at power-up.
    pub fn boot(&self) -> Events {
        let mut events = Events::new();
        push(&mut events, Event::Mode(Mode::Menu));
        push(&mut events, Event::Play(Sound::Theme));
        events
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn menu(&self) -> &Menu {
        &self.menu
    }

    pub const fn game(&self) -> &Game<R> {
        &self.game
    }

    /// Run one tick of the active mode.
    pub fn update(&mut self, raw: &RawInput, now_ms: u64) -> Events {
        let mut events = Events::new();
        match self.mode {
            Mode::Menu => self.update_menu(raw, now_ms, &mut events),
            Mode::Playing => {
                if self.pause_pressed(raw, now_ms) {
                    self.enter(Mode::Paused, &mut events);
                } else {
                    self.update_playing(raw, &mut events);
                }
            }
            Mode::Paused => {
                if self.pause_pressed(raw, now_ms) {
                    self.enter(Mode::Playing, &mut events);
                }
            }
        }
        events
    }

    fn update_menu(&mut self, raw: &RawInput, now_ms: u64, events: &mut Events) {
        match self.menu.update(raw, now_ms) {
            MenuAction::Start { enemy_count } => {
                self.game.restart(GameConfig::with_enemy_count(enemy_count));
                self.pause_held = raw.b.is_pressed();
                self.enter(Mode::Playing, events);
            }
            MenuAction::BackToMain => push(events, Event::Play(Sound::Theme)),
            MenuAction::EnemyCount(count) => debug!("enemy count set to {}", count),
            MenuAction::None | MenuAction::Moved | MenuAction::OpenOptions => {}
        }
    }

    fn update_playing(&mut self, raw: &RawInput, events: &mut Events) {
        let report = self.game.step(Intents::sample(raw));
        if report.fired {
            push(events, Event::Play(Sound::Shot));
        }
        for _ in 0..report.hits {
            push(events, Event::Play(Sound::Hit));
        }
    }

    /// Press edge of button B outside the quiet window.
    fn pause_pressed(&mut self, raw: &RawInput, now_ms: u64) -> bool {
        let pressed = raw.b.is_pressed();
        let edge = pressed && !self.pause_held;
        self.pause_held = pressed;
        if edge && now_ms >= self.pause_quiet_until_ms {
            self.pause_quiet_until_ms = now_ms + PAUSE_QUIET_MS;
            return true;
        }
        false
    }

    fn enter(&mut self, mode: Mode, events: &mut Events) {
        info!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
        push(events, Event::Mode(mode));
    }

    /// Draw the current mode into `target`. The caller presents the frame.
    pub fn draw<D, J>(&self, target: &mut D, jitter: &mut J) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
        J: RandomSource,
    {
        match self.mode {
            Mode::Menu => match self.menu.page() {
                Page::Main(item) => render::draw_main_menu(target, item),
                Page::Options(item) => {
                    render::draw_options_menu(target, item, self.menu.enemy_count())
                }
            },
            Mode::Playing => render::draw_playfield(target, &self.game, jitter),
            Mode::Paused => {
                render::draw_playfield(target, &self.game, jitter)?;
                render::draw_pause_banner(target)
            }
        }
    }
}

/// Queue an event. [`MAX_EVENTS`] covers the busiest tick, so this never
/// overflows.
fn push(events: &mut Events, event: Event) {
    let queued = events.push(event).is_ok();
    debug_assert!(queued, "event list overflow");
}
