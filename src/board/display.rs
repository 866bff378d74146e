//! SSD1306 display driver for the 128×64 monochrome OLED over I2C.
//!
//! The panel is used in buffered graphics mode: draw with `embedded-graphics`
//! then `flush().await` to push the frame. Call `init().await` once before the
//! first flush.

use esp_hal::{
    Async,
    i2c::master::{
        Config,
        I2c,
    },
    time::Rate,
};
use ssd1306::{
    I2CDisplayInterface,
    Ssd1306Async,
    mode::BufferedGraphicsModeAsync,
    prelude::{
        DisplayRotation,
        I2CInterface,
    },
    size::DisplaySize128x64,
};

use super::DisplayResources;

const I2C_FREQUENCY_KHZ: u32 = 400;

/// The game's SSD1306 display, ready to draw on with `embedded-graphics`.
pub type Display<'a> = Ssd1306Async<
    I2CInterface<I2c<'a, Async>>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

impl<'a> From<DisplayResources<'a>> for Display<'a> {
    fn from(res: DisplayResources<'a>) -> Self {
        let i2c = I2c::new(
            res.i2c,
            Config::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
        )
        .unwrap()
        .with_sda(res.sda)
        .with_scl(res.scl)
        .into_async();

        let interface = I2CDisplayInterface::new(i2c);
        Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode()
    }
}
