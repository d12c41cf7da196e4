//! Arithmetic operators for [`Beats`].
//!
//! Beat/beat arithmetic is exact. Mixing in an `f64` goes through the real
//! representation and is only as precise as the float.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::{Beats, PPQN};

impl Add for Beats {
    type Output = Beats;

    fn add(self, rhs: Beats) -> Beats {
        Beats::from_total(i128::from(self.to_ticks()) + i128::from(rhs.to_ticks()))
    }
}

impl Sub for Beats {
    type Output = Beats;

    fn sub(self, rhs: Beats) -> Beats {
        Beats::from_total(i128::from(self.to_ticks()) - i128::from(rhs.to_ticks()))
    }
}

impl AddAssign for Beats {
    fn add_assign(&mut self, rhs: Beats) {
        *self = *self + rhs;
    }
}

impl SubAssign for Beats {
    fn sub_assign(&mut self, rhs: Beats) {
        *self = *self - rhs;
    }
}

impl Add<i32> for Beats {
    type Output = Beats;

    /// Offsets by whole beats.
    fn add(self, beats: i32) -> Beats {
        self + Beats::from_beats(beats)
    }
}

impl Sub<i32> for Beats {
    type Output = Beats;

    fn sub(self, beats: i32) -> Beats {
        self - Beats::from_beats(beats)
    }
}

impl AddAssign<i32> for Beats {
    fn add_assign(&mut self, beats: i32) {
        *self = *self + beats;
    }
}

impl SubAssign<i32> for Beats {
    fn sub_assign(&mut self, beats: i32) {
        *self = *self - beats;
    }
}

impl Add<f64> for Beats {
    type Output = Beats;

    fn add(self, rhs: f64) -> Beats {
        Beats::from_f64(self.to_f64() + rhs)
    }
}

impl Sub<f64> for Beats {
    type Output = Beats;

    fn sub(self, rhs: f64) -> Beats {
        Beats::from_f64(self.to_f64() - rhs)
    }
}

impl Mul<i32> for Beats {
    type Output = Beats;

    /// Scales both components, then normalizes.
    fn mul(self, factor: i32) -> Beats {
        let factor = i128::from(factor);
        let beats = i128::from(self.beats()) * factor;
        let ticks = i128::from(self.ticks()) * factor;
        Beats::from_total(beats * i128::from(PPQN) + ticks)
    }
}

impl Div<i32> for Beats {
    type Output = Beats;

    /// Divides the total tick count so the remainder is truncated only once.
    ///
    /// Panics on a zero divisor, like integer division.
    fn div(self, factor: i32) -> Beats {
        Beats::from_total(i128::from(self.to_ticks()) / i128::from(factor))
    }
}

impl Neg for Beats {
    type Output = Beats;

    /// Negates both components. A normalized value stays normalized because
    /// beats and ticks already share a sign.
    fn neg(self) -> Beats {
        Beats::from_total(-i128::from(self.to_ticks()))
    }
}
