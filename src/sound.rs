//! Sound cues and the tone tables behind them.
//!
//! Two piezo buzzers: A plays the theme and the shot blip, B plays the low
//! thud when an enemy goes down. Tones are 50 % duty PWM square waves.

/// A tone of `hz` held for `ms` milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    pub hz: u32,
    pub ms: u32,
}

impl Note {
    pub const fn new(hz: u32, ms: u32) -> Self {
        Self { hz, ms }
    }

    /// A zero frequency is a rest.
    pub const fn is_rest(&self) -> bool {
        self.hz == 0
    }
}

/// C major arpeggio: C4, E4, G4, C5.
pub const THEME: [Note; 4] = [
    Note::new(262, 200),
    Note::new(330, 200),
    Note::new(392, 200),
    Note::new(523, 400),
];
pub const SHOT: [Note; 1] = [Note::new(100, 50)];
pub const HIT: [Note; 1] = [Note::new(50, 100)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Buzzer {
    A,
    B,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sound {
    Theme,
    Shot,
    Hit,
}

impl Sound {
    pub const fn buzzer(self) -> Buzzer {
        match self {
            Self::Theme | Self::Shot => Buzzer::A,
            Self::Hit => Buzzer::B,
        }
    }

    pub const fn notes(self) -> &'static [Note] {
        match self {
            Self::Theme => &THEME,
            Self::Shot => &SHOT,
            Self::Hit => &HIT,
        }
    }
}
