//! Host-side doubles for the display and the random source.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
};

use crate::{
    game::{
        SCREEN_HEIGHT,
        SCREEN_WIDTH,
    },
    rng::RandomSource,
};

const W: usize = SCREEN_WIDTH as usize;
const H: usize = SCREEN_HEIGHT as usize;

/// 128×64 monochrome frame that silently clips, like the SSD1306 buffer.
pub struct Frame {
    pixels: [[bool; W]; H],
    pub clears: usize,
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            pixels: [[false; W]; H],
            clears: 0,
        }
    }

    pub fn is_on(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return false;
        }
        self.pixels[y as usize][x as usize]
    }

    pub fn lit_in_row(&self, y: i32) -> usize {
        self.pixels[y as usize].iter().filter(|p| **p).count()
    }

    pub fn lit_in_column(&self, x: i32, rows: core::ops::Range<i32>) -> usize {
        rows.filter(|y| self.is_on(x, *y)).count()
    }

    /// Any pixel set inside the rectangle `[x0, x1) × [y0, y1)`.
    pub fn any_in(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        (y0..y1).any(|y| (x0..x1).any(|x| self.is_on(x, y)))
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 || point.x >= SCREEN_WIDTH || point.y >= SCREEN_HEIGHT {
                continue;
            }
            self.pixels[point.y as usize][point.x as usize] = color.is_on();
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clears += 1;
        for row in &mut self.pixels {
            row.fill(color.is_on());
        }
        Ok(())
    }
}

/// Replays a fixed list of values, wrapping around at the end.
pub struct Script {
    values: &'static [u32],
    next: usize,
}

impl Script {
    pub const fn new(values: &'static [u32]) -> Self {
        Self { values, next: 0 }
    }
}

impl RandomSource for Script {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}
