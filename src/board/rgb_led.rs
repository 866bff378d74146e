//! Discrete RGB indicator LED (common cathode, one GPIO per channel).
//!
//! Each channel is either on or off, so colours are thresholded at half
//! brightness.

use esp_hal::gpio::{
    Level,
    Output,
    OutputConfig,
};
use palette::{
    Srgb,
    named,
};

use super::RgbLedResources;
use crate::app::Mode;

pub struct RgbLed {
    red: Output<'static>,
    green: Output<'static>,
    blue: Output<'static>,
}

impl From<RgbLedResources<'static>> for RgbLed {
    fn from(res: RgbLedResources<'static>) -> Self {
        Self {
            red: Output::new(res.red, Level::Low, OutputConfig::default()),
            green: Output::new(res.green, Level::Low, OutputConfig::default()),
            blue: Output::new(res.blue, Level::Low, OutputConfig::default()),
        }
    }
}

impl RgbLed {
    pub fn set(&mut self, color: Srgb<u8>) {
        self.red.set_level(channel(color.red));
        self.green.set_level(channel(color.green));
        self.blue.set_level(channel(color.blue));
    }
}

const fn channel(value: u8) -> Level {
    if value >= 128 { Level::High } else { Level::Low }
}

/// Steady colour shown for each mode.
pub const fn mode_color(mode: Mode) -> Srgb<u8> {
    match mode {
        Mode::Menu => named::BLUE,
        Mode::Playing => named::LIME,
        Mode::Paused => named::YELLOW,
    }
}
