//! Joystick and button sampling.
//!
//! The joystick axes are read as 12-bit ADC values and split into three
//! zones; there is no proportional control. Buttons are wired to pull-ups, so
//! a pressed button reads low.

/// Largest reading of the 12-bit joystick converter.
pub const ADC_MAX: u16 = 4095;
/// Reading reported for a centred stick.
pub const ADC_CENTER: u16 = 2048;
/// Readings below this are in the low zone.
pub const LOW_THRESHOLD: u16 = 1000;
/// Readings above this are in the high zone.
pub const HIGH_THRESHOLD: u16 = 3000;

/// Discretized position of one joystick axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    Low,
    Dead,
    High,
}

impl Zone {
    pub const fn classify(reading: u16) -> Self {
        if reading < LOW_THRESHOLD {
            Self::Low
        } else if reading > HIGH_THRESHOLD {
            Self::High
        } else {
            Self::Dead
        }
    }
}

/// Electrical level of a button pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLevel {
    Low,
    #[default]
    High,
}

impl PinLevel {
    /// Buttons are active-low.
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::Low)
    }
}

/// One raw snapshot of the controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawInput {
    /// Horizontal axis reading.
    pub x: u16,
    /// Vertical axis reading. Low readings mean the stick is pushed down.
    pub y: u16,
    /// Fire / select button.
    pub a: PinLevel,
    /// Pause button.
    pub b: PinLevel,
}

impl Default for RawInput {
    fn default() -> Self {
        Self::idle()
    }
}

impl RawInput {
    /// Stick centred, nothing pressed.
    pub const fn idle() -> Self {
        Self {
            x: ADC_CENTER,
            y: ADC_CENTER,
            a: PinLevel::High,
            b: PinLevel::High,
        }
    }

    pub const fn x_zone(&self) -> Zone {
        Zone::classify(self.x)
    }

    pub const fn y_zone(&self) -> Zone {
        Zone::classify(self.y)
    }
}

/// Movement and fire intents for one gameplay tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Intents {
    /// -1 left, 0 none, +1 right.
    pub dx: i8,
    /// -1 up, 0 none, +1 down (screen coordinates).
    pub dy: i8,
    pub fire: bool,
}

impl Intents {
    pub const NONE: Self = Self {
        dx: 0,
        dy: 0,
        fire: false,
    };

    /// Map a raw snapshot to intents. Pure; touches no game state.
    pub const fn sample(raw: &RawInput) -> Self {
        let dx = match raw.x_zone() {
            Zone::Low => -1,
            Zone::Dead => 0,
            Zone::High => 1,
        };
        // The stick's vertical axis reads low when pushed down.
        let dy = match raw.y_zone() {
            Zone::Low => 1,
            Zone::Dead => 0,
            Zone::High => -1,
        };
        Self {
            dx,
            dy,
            fire: raw.a.is_pressed(),
        }
    }
}

impl From<&RawInput> for Intents {
    fn from(raw: &RawInput) -> Self {
        Self::sample(raw)
    }
}
