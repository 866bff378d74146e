//! Pseudo-random sources.
//!
//! Enemy respawn heights and the ground jitter both draw from a
//! [`RandomSource`] handed in by the caller, so the firmware can seed from the
//! hardware RNG while tests replay a fixed stream.

/// A stream of pseudo-random 32-bit values.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Value in `0..bound`, or `0` when `bound` is zero.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// xorshift32 generator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rng(u32);

impl Rng {
    /// Zero is a fixed point of xorshift, so it is replaced by a constant.
    pub const fn new(seed: u32) -> Self {
        Self(if seed == 0 { 0x9E37_79B9 } else { seed })
    }
}

impl RandomSource for Rng {
    fn next_u32(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }
}
