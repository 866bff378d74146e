//! Piezo buzzers on the LEDC PWM peripheral.
//!
//! Each buzzer owns one low-speed timer and one channel. A note retunes the
//! timer to the note's frequency, drives the pin at 50 % duty for the note's
//! length, then drops the duty to zero.

use defmt::Debug2Format;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::Channel,
};
use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::{
    gpio::AnyPin,
    ledc::{
        LSGlobalClkSource,
        Ledc,
        LowSpeed,
        channel::{
            self,
            ChannelIFace,
        },
        timer::{
            self,
            TimerIFace,
        },
    },
    time::Rate,
};

use super::BuzzerResources;
use crate::sound::{
    Note,
    Sound,
};

/// Cue queue in front of one buzzer. Senders use `try_send`, so a busy
/// buzzer drops cues instead of stalling the game tick.
pub type SoundChannel = Channel<CriticalSectionRawMutex, Sound, 4>;

/// 14-bit resolution keeps the APB divider in range down to the 50 Hz hit cue.
const DUTY_RESOLUTION: timer::config::Duty = timer::config::Duty::Duty14Bit;
const TONE_DUTY_PCT: u8 = 50;

pub struct Buzzer {
    ledc: &'static Ledc<'static>,
    pin: AnyPin<'static>,
    timer: timer::Number,
    channel: channel::Number,
}

impl Buzzer {
    pub const fn new(
        ledc: &'static Ledc<'static>,
        pin: AnyPin<'static>,
        timer: timer::Number,
        channel: channel::Number,
    ) -> Self {
        Self {
            ledc,
            pin,
            timer,
            channel,
        }
    }

    /// Play one note, or stay silent for its length when it is a rest.
    pub async fn tone(&mut self, note: Note) {
        let length = Duration::from_millis(u64::from(note.ms));
        if note.is_rest() {
            Timer::after(length).await;
            return;
        }

        let mut pwm_timer = self.ledc.timer::<LowSpeed>(self.timer);
        if let Err(e) = pwm_timer.configure(timer::config::Config {
            duty: DUTY_RESOLUTION,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_hz(note.hz),
        }) {
            error!("buzzer timer at {} Hz failed: {}", note.hz, Debug2Format(&e));
            Timer::after(length).await;
            return;
        }

        let mut pwm = self.ledc.channel(self.channel, self.pin.reborrow());
        if let Err(e) = pwm.configure(channel::config::Config {
            timer: &pwm_timer,
            duty_pct: TONE_DUTY_PCT,
            pin_config: channel::config::PinConfig::PushPull,
        }) {
            error!("buzzer channel failed: {}", Debug2Format(&e));
            Timer::after(length).await;
            return;
        }

        Timer::after(length).await;

        if let Err(e) = pwm.set_duty(0) {
            error!("buzzer mute failed: {}", Debug2Format(&e));
        }
    }

    pub async fn play(&mut self, sound: Sound) {
        for note in sound.notes() {
            self.tone(*note).await;
        }
    }
}

/// Buzzer A (melody, shots) and buzzer B (hits).
pub struct Buzzers {
    pub a: Buzzer,
    pub b: Buzzer,
}

impl From<BuzzerResources<'static>> for Buzzers {
    fn from(res: BuzzerResources<'static>) -> Self {
        let mut ledc = Ledc::new(res.ledc);
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
        let ledc: &'static Ledc<'static> = crate::mk_static!(Ledc<'static>, ledc);

        Self {
            a: Buzzer::new(
                ledc,
                AnyPin::from(res.a),
                timer::Number::Timer0,
                channel::Number::Channel0,
            ),
            b: Buzzer::new(
                ledc,
                AnyPin::from(res.b),
                timer::Number::Timer1,
                channel::Number::Channel1,
            ),
        }
    }
}
