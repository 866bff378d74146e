//! Space Impact firmware.
//!
//! The game task owns all gameplay state and runs one tick every
//! [`TICK_MS`]: sample the controls, update the app, draw and flush. Audio and
//! the indicator LED live in their own tasks and are fed through channels, so
//! a playing melody never holds up a frame.
//!
//! Controls:
//! - Joystick: move ship / navigate menu / adjust enemy count
//! - A or stick click: fire / select
//! - B: pause and resume

#![no_std]
#![no_main]

use defmt::{
    Debug2Format,
    error,
    info,
};
use embassy_executor::Spawner;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::Channel,
};
use embassy_time::{
    Duration,
    Instant,
    Timer,
};
use esp_backtrace as _;
use esp_hal::{
    rng::Rng as HalRng,
    timer::timg::TimerGroup,
};
use esp_println as _;
use palette::named;
use ssd1306::mode::DisplayConfigAsync;
#[allow(clippy::wildcard_imports)]
use space_impact::*;
use space_impact::{
    app::{
        App,
        Event,
        Mode,
    },
    rng::Rng,
    sound::{
        Buzzer as Route,
        Sound,
    },
};

esp_bootloader_esp_idf::esp_app_desc!();

// ── Tuning ──────────────────────────────────────────────────────────────────
const TICK_MS: u64 = 20;
const HIT_FLASH_MS: u64 = 60;

// ── Channels ────────────────────────────────────────────────────────────────
static BUZZER_A: SoundChannel = Channel::new();
static BUZZER_B: SoundChannel = Channel::new();

#[derive(Clone, Copy)]
enum LedEvent {
    /// Mode changed, show its steady colour
    Mode(Mode),
    /// Enemy destroyed: white flash, then back to the mode colour
    Hit,
}

static LED_CHANNEL: Channel<CriticalSectionRawMutex, LedEvent, 4> = Channel::new();

fn dispatch(events: &[Event]) {
    for event in events {
        match *event {
            Event::Play(sound) => {
                let channel = match sound.buzzer() {
                    Route::A => &BUZZER_A,
                    Route::B => &BUZZER_B,
                };
                channel.try_send(sound).ok();
                if sound == Sound::Hit {
                    LED_CHANNEL.try_send(LedEvent::Hit).ok();
                }
            }
            Event::Mode(mode) => {
                LED_CHANNEL.try_send(LedEvent::Mode(mode)).ok();
            }
        }
    }
}

// ── Tasks ───────────────────────────────────────────────────────────────────

#[embassy_executor::task(pool_size = 2)]
async fn buzzer_task(buzzer: &'static mut Buzzer, channel: &'static SoundChannel) {
    loop {
        let sound = channel.receive().await;
        buzzer.play(sound).await;
    }
}

#[embassy_executor::task]
async fn led_task(led: &'static mut RgbLed) {
    info!("LED task started");
    let mut steady = mode_color(Mode::Menu);
    led.set(steady);
    loop {
        match LED_CHANNEL.receive().await {
            LedEvent::Mode(mode) => {
                steady = mode_color(mode);
                led.set(steady);
            }
            LedEvent::Hit => {
                led.set(named::WHITE);
                Timer::after(Duration::from_millis(HIT_FLASH_MS)).await;
                led.set(steady);
            }
        }
    }
}

#[embassy_executor::task]
async fn game_task(
    display: &'static mut Display<'static>,
    joystick: &'static mut Joystick<'static>,
    buttons: &'static mut Buttons,
    seed: u32,
) {
    info!("Space Impact started, seed {=u32:#x}", seed);

    let mut app = App::new(Rng::new(seed));
    // Ground flicker must not disturb the enemy respawn stream.
    let mut jitter = Rng::new(seed.rotate_left(16));
    dispatch(&app.boot());

    let tick = Duration::from_millis(TICK_MS);
    let mut next_frame = Instant::now() + tick;

    loop {
        let raw = sample_input(joystick, buttons);
        let events = app.update(&raw, Instant::now().as_millis());
        dispatch(&events);

        if app.draw(display, &mut jitter).is_err() {
            error!("frame draw failed");
        }
        if let Err(e) = display.flush().await {
            error!("frame flush failed: {}", Debug2Format(&e));
        }

        Timer::at(next_frame).await;
        next_frame += tick;
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = space_impact::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let seed = HalRng::new().random();

    let display = mk_static!(Display<'static>, resources.display.into());
    display.init().await.unwrap();
    let joystick = mk_static!(Joystick<'static>, resources.joystick.into());
    let buttons = mk_static!(Buttons, resources.buttons.into());
    let led = mk_static!(RgbLed, resources.rgb.into());
    let buzzers = mk_static!(Buzzers, resources.buzzers.into());

    spawner.must_spawn(buzzer_task(&mut buzzers.a, &BUZZER_A));
    spawner.must_spawn(buzzer_task(&mut buzzers.b, &BUZZER_B));
    spawner.must_spawn(led_task(led));
    spawner.must_spawn(game_task(display, joystick, buttons, seed));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
