//! Analog joystick on ADC1.

use esp_hal::{
    Blocking,
    analog::adc::{
        Adc,
        AdcConfig,
        AdcPin,
        Attenuation,
    },
    peripherals::{
        ADC1,
        GPIO1,
        GPIO2,
    },
};

use super::JoystickResources;
use crate::input::ADC_CENTER;

/// Both stick axes, read with blocking one-shot conversions.
pub struct Joystick<'d> {
    adc: Adc<'d, ADC1<'d>, Blocking>,
    x: AdcPin<GPIO1<'d>, ADC1<'d>>,
    y: AdcPin<GPIO2<'d>, ADC1<'d>>,
}

impl<'d> From<JoystickResources<'d>> for Joystick<'d> {
    fn from(res: JoystickResources<'d>) -> Self {
        let mut config = AdcConfig::new();
        // 11 dB covers the full 0..3.3 V swing of the stick.
        let x = config.enable_pin(res.x, Attenuation::_11dB);
        let y = config.enable_pin(res.y, Attenuation::_11dB);
        Self {
            adc: Adc::new(res.adc, config),
            x,
            y,
        }
    }
}

impl Joystick<'_> {
    /// Raw `(x, y)` readings in `0..=4095`. A failed conversion reads as the
    /// centre so the ship just stops.
    pub fn read(&mut self) -> (u16, u16) {
        let x = nb::block!(self.adc.read_oneshot(&mut self.x)).unwrap_or_else(|()| {
            warn!("joystick X read failed");
            ADC_CENTER
        });
        let y = nb::block!(self.adc.read_oneshot(&mut self.y)).unwrap_or_else(|()| {
            warn!("joystick Y read failed");
            ADC_CENTER
        });
        (x, y)
    }
}
