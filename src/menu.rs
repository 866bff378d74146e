//! Title menu and options page.
//!
//! Debouncing is done with a quiet window: after any accepted action, input
//! is ignored until `now_ms` passes the window's end.

use crate::{
    game::{
        DEFAULT_ENEMY_COUNT,
        MAX_ENEMIES,
    },
    input::{
        RawInput,
        Zone,
    },
};

pub const NAV_QUIET_MS: u64 = 200;
pub const ADJUST_QUIET_MS: u64 = 100;
pub const SELECT_QUIET_MS: u64 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MainItem {
    Start,
    Options,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OptionsItem {
    Enemies,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    Main(MainItem),
    Options(OptionsItem),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    None,
    Moved,
    EnemyCount(usize),
    OpenOptions,
    BackToMain,
    Start { enemy_count: usize },
}

pub struct Menu {
    page: Page,
    enemy_count: usize,
    quiet_until_ms: u64,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new(DEFAULT_ENEMY_COUNT)
    }
}

impl Menu {
    pub const fn new(enemy_count: usize) -> Self {
        Self {
            page: Page::Main(MainItem::Start),
            enemy_count: if enemy_count > MAX_ENEMIES {
                MAX_ENEMIES
            } else {
                enemy_count
            },
            quiet_until_ms: 0,
        }
    }

    pub const fn page(&self) -> Page {
        self.page
    }

    pub const fn enemy_count(&self) -> usize {
        self.enemy_count
    }

    /// Back to the title page with "Start" highlighted. The enemy count is
    /// kept.
    pub fn reset(&mut self) {
        self.page = Page::Main(MainItem::Start);
    }

    /// Handle one poll. Navigation wins over adjustment, which wins over
    /// selection; only one action is taken per poll.
    pub fn update(&mut self, raw: &RawInput, now_ms: u64) -> MenuAction {
        if now_ms < self.quiet_until_ms {
            return MenuAction::None;
        }

        if self.navigate(raw.y_zone()) {
            self.quiet(now_ms, NAV_QUIET_MS);
            return MenuAction::Moved;
        }

        if let Some(count) = self.adjust(raw.x_zone()) {
            self.quiet(now_ms, ADJUST_QUIET_MS);
            return MenuAction::EnemyCount(count);
        }

        if raw.a.is_pressed() {
            let action = self.select();
            if action != MenuAction::None {
                self.quiet(now_ms, SELECT_QUIET_MS);
            }
            return action;
        }

        MenuAction::None
    }

    fn quiet(&mut self, now_ms: u64, window_ms: u64) {
        self.quiet_until_ms = now_ms + window_ms;
    }

    /// Low zone moves the highlight down, high zone up.
    fn navigate(&mut self, zone: Zone) -> bool {
        let next = match (self.page, zone) {
            (Page::Main(MainItem::Start), Zone::Low) => Page::Main(MainItem::Options),
            (Page::Main(MainItem::Options), Zone::High) => Page::Main(MainItem::Start),
            (Page::Options(OptionsItem::Enemies), Zone::Low) => Page::Options(OptionsItem::Back),
            (Page::Options(OptionsItem::Back), Zone::High) => Page::Options(OptionsItem::Enemies),
            _ => return false,
        };
        self.page = next;
        true
    }

    fn adjust(&mut self, zone: Zone) -> Option<usize> {
        if self.page != Page::Options(OptionsItem::Enemies) {
            return None;
        }
        match zone {
            Zone::Low if self.enemy_count > 0 => self.enemy_count -= 1,
            Zone::High if self.enemy_count < MAX_ENEMIES => self.enemy_count += 1,
            _ => return None,
        }
        Some(self.enemy_count)
    }

    fn select(&mut self) -> MenuAction {
        match self.page {
            Page::Main(MainItem::Start) => MenuAction::Start {
                enemy_count: self.enemy_count,
            },
            Page::Main(MainItem::Options) => {
                self.page = Page::Options(OptionsItem::Enemies);
                MenuAction::OpenOptions
            }
            Page::Options(OptionsItem::Back) => {
                self.page = Page::Main(MainItem::Start);
                MenuAction::BackToMain
            }
            Page::Options(OptionsItem::Enemies) => MenuAction::None,
        }
    }
}
