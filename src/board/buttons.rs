//! Push buttons: A (fire / select), B (pause) and the joystick click.
//!
//! All three are active low with internal pull-ups. The joystick click is
//! wired in parallel with A, so pressing the stick also fires.

use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use super::ButtonResources;
use crate::input::PinLevel;

pub struct Buttons {
    pub a: Input<'static>,
    pub b: Input<'static>,
    pub stick: Input<'static>,
}

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            a: Input::new(res.a, pull_up),
            b: Input::new(res.b, pull_up),
            stick: Input::new(res.stick, pull_up),
        }
    }
}

impl Buttons {
    /// Current (A, B) levels. A reads low when either A or the stick is down.
    pub fn levels(&self) -> (PinLevel, PinLevel) {
        let a = if self.a.is_low() || self.stick.is_low() {
            PinLevel::Low
        } else {
            PinLevel::High
        };
        (a, level(&self.b))
    }
}

fn level(pin: &Input<'_>) -> PinLevel {
    if pin.is_low() {
        PinLevel::Low
    } else {
        PinLevel::High
    }
}
