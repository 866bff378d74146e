//! Frame rendering for the 128×64 monochrome OLED.
//!
//! Everything is drawn into an `embedded-graphics` [`DrawTarget`]; the caller
//! flushes the buffer to the panel afterwards. Each frame is redrawn from
//! scratch.

use core::fmt::Write as _;

use embedded_graphics::{
    mono_font::{
        MonoFont,
        MonoTextStyle,
        ascii::{
            FONT_6X10,
            FONT_9X15_BOLD,
        },
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{
        Line,
        PrimitiveStyle,
        Rectangle,
    },
    text::{
        Baseline,
        Text,
    },
};
use heapless::String;

use crate::{
    game::{
        Game,
        SCREEN_HEIGHT,
        SCREEN_WIDTH,
    },
    menu::{
        MainItem,
        OptionsItem,
    },
    rng::RandomSource,
};

// ── Bitmaps ─────────────────────────────────────────────────────────────────
pub const SHIP_BITMAP: [[u8; 10]; 10] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 0, 1, 1, 1, 0, 0, 0],
    [0, 0, 1, 0, 1, 1, 0, 1, 0, 0],
    [1, 1, 0, 1, 1, 1, 1, 0, 1, 1],
    [0, 0, 1, 0, 1, 1, 0, 1, 0, 0],
    [0, 1, 1, 0, 1, 1, 1, 0, 0, 0],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// 10 rows × 8 columns.
pub const ENEMY_BITMAP: [[u8; 8]; 10] = [
    [0, 0, 0, 1, 1, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 0, 1, 1, 0, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 0, 1, 1, 0, 1, 0],
    [0, 0, 1, 0, 0, 1, 0, 0],
    [0, 1, 0, 0, 0, 0, 1, 0],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

// ── Layout ──────────────────────────────────────────────────────────────────
pub const GROUND_LEVEL: i32 = SCREEN_HEIGHT - 10;
pub const GROUND_JITTER: u32 = 5;

const MENU_SHIP: Point = Point::new(100, 31);
const TITLE_LINE: (Point, Point) = (Point::new(20, 35), Point::new(98, 35));

/// Set cells of `bitmap` as pixels, offset by `origin`.
pub fn bitmap_pixels<const W: usize, const H: usize>(
    bitmap: &'static [[u8; W]; H],
    origin: Point,
) -> impl Iterator<Item = Pixel<BinaryColor>> {
    bitmap.iter().enumerate().flat_map(move |(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell != 0)
            .map(move |(col, _)| {
                Pixel(
                    origin + Point::new(col as i32, row as i32),
                    BinaryColor::On,
                )
            })
    })
}

fn text<D>(target: &mut D, s: &str, at: Point, font: &MonoFont<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline(s, at, MonoTextStyle::new(font, BinaryColor::On), Baseline::Top)
        .draw(target)?;
    Ok(())
}

fn item_label<'a>(buf: &'a mut String<16>, selected: bool, label: &str) -> &'a str {
    buf.clear();
    let marker = if selected { "> " } else { "  " };
    write!(buf, "{marker}{label}").ok();
    buf.as_str()
}

// ── Playfield ───────────────────────────────────────────────────────────────

/// Draw one gameplay frame: score, ship, ground, bullets, enemies.
pub fn draw_playfield<D, R, J>(target: &mut D, game: &Game<R>, jitter: &mut J) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
    R: RandomSource,
    J: RandomSource,
{
    target.clear(BinaryColor::Off)?;

    let mut score: String<20> = String::new();
    write!(score, "Score: {}", game.score()).ok();
    text(target, &score, Point::zero(), &FONT_6X10)?;

    target.draw_iter(bitmap_pixels(&SHIP_BITMAP, game.ship().pos))?;

    draw_ground(target, jitter)?;

    target.draw_iter(
        game.bullets()
            .iter()
            .map(|(_, bullet)| Pixel(bullet.pos, BinaryColor::On)),
    )?;

    for (_, enemy) in game.participating_enemies() {
        target.draw_iter(bitmap_pixels(&ENEMY_BITMAP, enemy.pos))?;
    }

    Ok(())
}

/// Decorative ground: one pixel per column a few rows above the bottom edge,
/// re-rolled every frame.
pub fn draw_ground<D, J>(target: &mut D, jitter: &mut J) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
    J: RandomSource,
{
    target.draw_iter((0..SCREEN_WIDTH).map(|x| {
        let y = GROUND_LEVEL + jitter.below(GROUND_JITTER) as i32;
        Pixel(Point::new(x, y), BinaryColor::On)
    }))
}

/// Boxed "PAUSED" label over whatever is already in the buffer.
pub fn draw_pause_banner<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::new(34, 22), Size::new(60, 20))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(target)?;
    Rectangle::new(Point::new(34, 22), Size::new(60, 20))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target)?;
    text(target, "PAUSED", Point::new(46, 27), &FONT_6X10)
}

// ── Menus ───────────────────────────────────────────────────────────────────

pub fn draw_main_menu<D>(target: &mut D, selected: MainItem) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    text(target, "SPACE", Point::new(30, 0), &FONT_9X15_BOLD)?;
    text(target, "IMPACT", Point::new(25, 18), &FONT_9X15_BOLD)?;
    Line::new(TITLE_LINE.0, TITLE_LINE.1)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target)?;

    target.draw_iter(bitmap_pixels(&SHIP_BITMAP, MENU_SHIP))?;

    let mut buf = String::new();
    let start = item_label(&mut buf, selected == MainItem::Start, "Start");
    text(target, start, Point::new(30, 42), &FONT_6X10)?;
    let options = item_label(&mut buf, selected == MainItem::Options, "Options");
    text(target, options, Point::new(30, 52), &FONT_6X10)
}

pub fn draw_options_menu<D>(
    target: &mut D,
    selected: OptionsItem,
    enemy_count: usize,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    text(target, "Options", Point::new(34, 8), &FONT_9X15_BOLD)?;

    let mut buf = String::new();
    let enemies = item_label(&mut buf, selected == OptionsItem::Enemies, "Enemies");
    text(target, enemies, Point::new(20, 28), &FONT_6X10)?;

    let mut count: String<16> = String::new();
    write!(count, "Enemies: {enemy_count}").ok();
    text(target, &count, Point::new(40, 39), &FONT_6X10)?;

    let back = item_label(&mut buf, selected == OptionsItem::Back, "Back");
    text(target, back, Point::new(20, 50), &FONT_6X10)
}
