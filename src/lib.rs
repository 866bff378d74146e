//! # space-impact
//!
//! A small Space Impact style side-scroller for an ESP32-S3 with a 128×64
//! SSD1306 OLED, an analog joystick, two buttons, an RGB LED and two piezo
//! buzzers.
//!
//! The gameplay core is `no_std`, allocation-free and hardware-agnostic:
//! - **Input**: raw joystick/button readings → movement and fire intents
//! - **Game**: fixed-capacity bullet and enemy pools, simulation step, hits
//! - **Render**: draws into any `embedded-graphics` [`DrawTarget`] with
//!   [`BinaryColor`]
//! - **Menu** / **App**: title menu, options page, pause and the per-tick
//!   driver that ties everything together
//!
//! With the `board` feature the crate also provides the ESP32-S3 bring-up
//! used by the `space-impact` firmware binary.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = space_impact::init();
//! let resources = space_impact::split_resources!(peripherals);
//!
//! let display: space_impact::Display = resources.display.into();
//! let joystick: space_impact::Joystick = resources.joystick.into();
//! let buttons: space_impact::Buttons = resources.buttons.into();
//! ```
//!
//! [`DrawTarget`]: embedded_graphics::prelude::DrawTarget
//! [`BinaryColor`]: embedded_graphics::pixelcolor::BinaryColor

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod app;
pub mod game;
pub mod input;
pub mod menu;
pub mod render;
pub mod rng;
pub mod slots;
pub mod sound;

#[cfg(test)]
mod testing;

#[cfg(feature = "board")]
mod board;
#[cfg(feature = "board")]
pub use board::*;
