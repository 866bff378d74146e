//! ESP32-S3 board support: pin assignment, bring-up and peripheral wrappers.

mod buttons;
mod buzzer;
mod display;
mod joystick;
mod rgb_led;

pub use buttons::Buttons;
pub use buzzer::{
    Buzzer,
    Buzzers,
    SoundChannel,
};
pub use display::Display;
use esp_hal::{
    assign_resources,
    clock::CpuClock,
};
pub use joystick::Joystick;
pub use rgb_led::{
    RgbLed,
    mode_color,
};

use crate::input::RawInput;

/// StaticCell helper: allocates a value into a `static` exactly once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            sda: GPIO8,
            scl: GPIO9,
            i2c: I2C0,
        },
        joystick: JoystickResources<'d> {
            x: GPIO1,
            y: GPIO2,
            adc: ADC1,
        },
        buttons: ButtonResources<'d> {
            a: GPIO11,
            b: GPIO12,
            stick: GPIO13,
        },
        rgb: RgbLedResources<'d> {
            red: GPIO14,
            green: GPIO15,
            blue: GPIO16,
        },
        buzzers: BuzzerResources<'d> {
            a: GPIO17,
            b: GPIO18,
            ledc: LEDC,
        }
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Initialise the board at full CPU clock and return the raw peripheral set.
///
/// Call this once at the top of your `main`. Then use [`split_resources!`] to
/// break the peripherals into typed resource groups.
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}

/// One snapshot of every gameplay input.
pub fn sample_input(joystick: &mut Joystick<'_>, buttons: &Buttons) -> RawInput {
    let (x, y) = joystick.read();
    let (a, b) = buttons.levels();
    RawInput { x, y, a, b }
}
