use std::cmp::Ordering;
use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use thiserror::Error;

use crate::{RoundMode, PPQN};

/// Largest distance at which a [`Beats`] and a raw `f64` still compare equal.
const TICK_TOLERANCE: f64 = 1.0 / PPQN as f64;

/// Musical time in beats, which are assumed to be quarter notes.
///
/// A value is a whole beat count plus a sub-beat tick offset at [`PPQN`]
/// resolution. Every constructor and arithmetic operator leaves the value in
/// normalized form: `|ticks| < PPQN`, and `ticks` carries the sign of the
/// whole value. With that form the derived lexicographic `(beats, ticks)`
/// ordering is also the numeric ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "(i32, i32)", into = "(i32, i32)"))]
pub struct Beats {
    beats: i32,
    ticks: i32,
}

impl Beats {
    /// The zero position.
    pub const ZERO: Beats = Beats { beats: 0, ticks: 0 };

    /// Largest representable value.
    pub const MAX: Beats = Beats {
        beats: i32::MAX,
        ticks: PPQN - 1,
    };

    /// Most negative representable value.
    pub const LOWEST: Beats = Beats {
        beats: i32::MIN,
        ticks: -(PPQN - 1),
    };

    /// Creates a value from a beat/tick pair, normalizing any tick overflow
    /// or sign mismatch into the beat component.
    ///
    /// The total tick count `beats * PPQN + ticks` is preserved exactly;
    /// totals outside the representable range saturate to [`Beats::MAX`] or
    /// [`Beats::LOWEST`].
    pub fn new(beats: i32, ticks: i32) -> Self {
        Self::from_total(i128::from(beats) * i128::from(PPQN) + i128::from(ticks))
    }

    /// Creates a value from a whole number of beats.
    pub fn from_beats(beats: i32) -> Self {
        Self::new(beats, 0)
    }

    /// Creates a value from ticks at the standard [`PPQN`].
    pub fn from_ticks(ticks: i32) -> Self {
        Self::new(0, ticks)
    }

    /// Creates a value from a real number of beats.
    ///
    /// The fractional part is truncated to whole ticks, so the result is
    /// within one tick of `time`.
    pub fn from_f64(time: f64) -> Self {
        let whole = time.trunc();
        let frac = time - whole;
        Self::new(whole as i32, (frac * f64::from(PPQN)) as i32)
    }

    /// Creates a value from ticks counted at an arbitrary `rate` per beat.
    ///
    /// This also converts from frames when `rate` is the number of samples
    /// per beat. The result has the standard [`PPQN`], so the conversion is
    /// lossy whenever `rate` does not divide evenly into it.
    ///
    /// # Panics
    ///
    /// Panics if `rate` is zero.
    pub fn ticks_at_rate(ticks: i64, rate: u32) -> Self {
        assert!(rate > 0, "tick rate must be non-zero");
        let rate = i64::from(rate);
        let whole = ticks / rate;
        let rescaled = (ticks % rate) * i64::from(PPQN) / rate;
        Self::from_total(i128::from(whole) * i128::from(PPQN) + i128::from(rescaled))
    }

    /// A single tick.
    pub fn tick() -> Self {
        Self { beats: 0, ticks: 1 }
    }

    /// Whole beat component.
    pub fn beats(&self) -> i32 {
        self.beats
    }

    /// Sub-beat tick component, with the same sign as the whole value.
    pub fn ticks(&self) -> i32 {
        self.ticks
    }

    /// Returns `true` for the zero position.
    pub fn is_zero(&self) -> bool {
        self.beats == 0 && self.ticks == 0
    }

    /// Real number of beats.
    pub fn to_f64(&self) -> f64 {
        f64::from(self.beats) + f64::from(self.ticks) / f64::from(PPQN)
    }

    /// Total number of ticks at the standard [`PPQN`].
    pub fn to_ticks(&self) -> i64 {
        i64::from(self.beats) * i64::from(PPQN) + i64::from(self.ticks)
    }

    /// Total number of ticks at an arbitrary `rate` per beat.
    pub fn to_ticks_at_rate(&self, rate: u32) -> i64 {
        let rate = i64::from(rate);
        i64::from(self.beats) * rate + i64::from(self.ticks) * rate / i64::from(PPQN)
    }

    /// Rounds to the nearest whole beat. Half a beat rounds up, towards
    /// positive time.
    pub fn round_to_beat(&self) -> Self {
        let (floor, offset) = self.beat_floor();
        if offset * 2 >= i64::from(PPQN) {
            Self::at_tick(floor + i64::from(PPQN))
        } else {
            Self::at_tick(floor)
        }
    }

    /// Moves to the next beat boundary unless already on one.
    pub fn round_up_to_beat(&self) -> Self {
        match self.beat_floor() {
            (_, 0) => *self,
            (floor, _) => Self::at_tick(floor + i64::from(PPQN)),
        }
    }

    /// Moves to the beat boundary at or before this position.
    pub fn round_down_to_beat(&self) -> Self {
        Self::at_tick(self.beat_floor().0)
    }

    /// The beat before this one. Always moves backwards, even on a beat.
    pub fn prev_beat(&self) -> Self {
        Self::at_tick(self.beat_floor().0 - i64::from(PPQN))
    }

    /// The beat after this one. Always moves forwards, even on a beat.
    pub fn next_beat(&self) -> Self {
        Self::at_tick(self.beat_floor().0 + i64::from(PPQN))
    }

    /// Quantizes onto a grid of `subdivision` cells per beat.
    ///
    /// Cells are `PPQN / subdivision` ticks wide and laid out on the absolute
    /// tick line, so moving forwards may cross into the following beat.
    /// Ties in [`RoundMode::Nearest`] go to the next cell. A backwards move
    /// never lands below zero: when it would, the value is returned as is.
    ///
    /// Rounding up is not wrapped back into the current beat. That wrap was
    /// once considered for "jump to next subdivision" and is still disabled,
    /// so a value in the last cell of a beat rounds up onto the next beat.
    ///
    /// # Panics
    ///
    /// Panics if `subdivision` is zero or greater than [`PPQN`].
    pub fn round_to_subdivision(&self, subdivision: u32, mode: RoundMode) -> Self {
        assert!(
            subdivision > 0 && subdivision <= PPQN as u32,
            "subdivision must be within 1..={PPQN}, got {subdivision}"
        );

        let cell = i64::from(PPQN) / i64::from(subdivision);
        let ticks = self.to_ticks();
        let offset = ticks.rem_euclid(cell);

        let target = match mode {
            RoundMode::UpMaybe | RoundMode::UpAlways => {
                if offset == 0 && !mode.forces_move() {
                    ticks
                } else {
                    ticks + (cell - offset)
                }
            }
            RoundMode::DownMaybe | RoundMode::DownAlways => match offset {
                0 if mode.forces_move() => ticks - cell,
                0 => ticks,
                _ => ticks - offset,
            },
            RoundMode::Nearest => {
                if offset == 0 {
                    ticks
                } else if offset * 2 >= cell {
                    ticks + (cell - offset)
                } else {
                    ticks - offset
                }
            }
        };

        if target < ticks && target < 0 {
            return *self;
        }
        Self::at_tick(target)
    }

    /// Snaps up to the smallest multiple of `grid` that is not before `self`.
    ///
    /// # Panics
    ///
    /// Panics if `grid` is zero.
    pub fn snap_to(&self, grid: Beats) -> Self {
        assert!(!grid.is_zero(), "snap grid must be non-zero");
        let step = grid.to_f64();
        Self::from_f64((self.to_f64() / step).ceil() * step)
    }

    /// Total ticks of the beat boundary at or before `self`, and the
    /// non-negative distance from it.
    fn beat_floor(&self) -> (i64, i64) {
        let ticks = self.to_ticks();
        let offset = ticks.rem_euclid(i64::from(PPQN));
        (ticks - offset, offset)
    }

    fn at_tick(total: i64) -> Self {
        Self::from_total(i128::from(total))
    }

    pub(crate) fn from_total(total: i128) -> Self {
        let ppqn = i128::from(PPQN);
        let beats = total / ppqn;
        let ticks = (total % ppqn) as i32;
        match i32::try_from(beats) {
            Ok(beats) => Self { beats, ticks },
            Err(_) if total > 0 => Self::MAX,
            Err(_) => Self::LOWEST,
        }
    }
}

impl From<f64> for Beats {
    fn from(time: f64) -> Self {
        Self::from_f64(time)
    }
}

impl From<(i32, i32)> for Beats {
    fn from((beats, ticks): (i32, i32)) -> Self {
        Self::new(beats, ticks)
    }
}

impl From<Beats> for (i32, i32) {
    fn from(value: Beats) -> Self {
        (value.beats, value.ticks)
    }
}

impl PartialEq<f64> for Beats {
    /// Equal when within one tick, absorbing float round-trip error.
    fn eq(&self, other: &f64) -> bool {
        (self.to_f64() - other).abs() <= TICK_TOLERANCE
    }
}

impl PartialOrd<f64> for Beats {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        let time = self.to_f64();
        if (time - other).abs() <= TICK_TOLERANCE {
            Some(Ordering::Equal)
        } else {
            time.partial_cmp(other)
        }
    }
}

impl fmt::Display for Beats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.beats, self.ticks)
    }
}

/// Error returned when parsing a [`Beats`] value from text.
#[derive(Debug, Error)]
pub enum ParseBeatsError {
    /// The input was not a number.
    #[error("invalid beat value {input:?}: {source}")]
    Invalid {
        input: String,
        #[source]
        source: ParseFloatError,
    },
    /// The input parsed to infinity or NaN.
    #[error("beat value {0:?} is not finite")]
    NonFinite(String),
}

impl FromStr for Beats {
    type Err = ParseBeatsError;

    /// Parses a real number of beats, e.g. `"2.5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let time: f64 = input.parse().map_err(|source| ParseBeatsError::Invalid {
            input: input.to_string(),
            source,
        })?;
        if !time.is_finite() {
            return Err(ParseBeatsError::NonFinite(input.to_string()));
        }
        Ok(Self::from_f64(time))
    }
}
