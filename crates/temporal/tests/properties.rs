use std::cmp::Ordering;

use cadence_temporal::{Beats, RoundMode, PPQN};
use proptest::prelude::*;

fn any_beats() -> impl Strategy<Value = Beats> {
    (-100_000i32..100_000, -(4 * PPQN)..(4 * PPQN)).prop_map(|(b, t)| Beats::new(b, t))
}

fn round_mode() -> impl Strategy<Value = RoundMode> {
    prop_oneof![
        Just(RoundMode::DownMaybe),
        Just(RoundMode::DownAlways),
        Just(RoundMode::Nearest),
        Just(RoundMode::UpAlways),
        Just(RoundMode::UpMaybe),
    ]
}

fn subdivision() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![1u32, 2, 3, 4, 8, 16, 24])
}

proptest! {
    #[test]
    fn construction_is_normalized_and_exact(b in -1_000_000i32..1_000_000, t in any::<i32>()) {
        let value = Beats::new(b, t);
        prop_assert!(value.ticks().abs() < PPQN);
        prop_assert!(value.ticks() == 0 || value.beats() == 0 || value.ticks().signum() == value.beats().signum());
        let expected = i64::from(b) * i64::from(PPQN) + i64::from(t);
        prop_assert_eq!(value.to_ticks(), expected);
    }

    #[test]
    fn float_round_trip_within_one_tick(x in -1.0e4f64..1.0e4) {
        let value = Beats::from_f64(x);
        prop_assert!((value.to_f64() - x).abs() <= 1.0 / f64::from(PPQN));
        prop_assert!(value == x);
    }

    #[test]
    fn ordering_is_total_and_lexicographic(a in any_beats(), b in any_beats()) {
        let relations = [a < b, a == b, a > b];
        prop_assert_eq!(relations.iter().filter(|r| **r).count(), 1);
        prop_assert_eq!(a.cmp(&b), (a.beats(), a.ticks()).cmp(&(b.beats(), b.ticks())));
        prop_assert_eq!(a.cmp(&b), a.to_ticks().cmp(&b.to_ticks()));
    }

    #[test]
    fn add_then_sub_restores(a in any_beats(), b in any_beats()) {
        prop_assert_eq!((a + b) - b, a);
        prop_assert_eq!(a - a, Beats::ZERO);
        prop_assert_eq!(-(-a), a);
    }

    #[test]
    fn subdivision_lands_on_grid(value in any_beats(), n in subdivision(), mode in round_mode()) {
        let cell = i64::from(PPQN / n as i32);
        let rounded = value.round_to_subdivision(n, mode);
        let moved = rounded != value;
        if moved {
            prop_assert_eq!(rounded.to_ticks().rem_euclid(cell), 0);
            prop_assert!((rounded.to_ticks() - value.to_ticks()).abs() <= cell);
        }
        match mode.direction() {
            Ordering::Greater => prop_assert!(rounded >= value),
            Ordering::Less => prop_assert!(rounded <= value),
            Ordering::Equal => {}
        }
        if value >= Beats::ZERO {
            prop_assert!(rounded >= Beats::ZERO);
        }
    }

    #[test]
    fn whole_beat_rounding_brackets_the_value(value in any_beats()) {
        let down = value.round_down_to_beat();
        let up = value.round_up_to_beat();
        prop_assert!(down <= value && value <= up);
        prop_assert_eq!(down.ticks(), 0);
        prop_assert_eq!(up.ticks(), 0);
        prop_assert!(up - down <= Beats::from_beats(1));

        let nearest = value.round_to_beat();
        prop_assert!(nearest == down || nearest == up);
        prop_assert!((nearest - value).to_ticks().abs() * 2 <= i64::from(PPQN));

        prop_assert_eq!(value.prev_beat(), down - Beats::from_beats(1));
        prop_assert_eq!(value.next_beat(), down + Beats::from_beats(1));
        prop_assert!(value.prev_beat() < value && value < value.next_beat());
    }

    #[test]
    fn whole_beat_round_up_matches_single_subdivision(value in any_beats()) {
        prop_assert_eq!(
            value.round_up_to_beat(),
            value.round_to_subdivision(1, RoundMode::UpMaybe)
        );
    }

    #[test]
    fn nearest_picks_the_closer_boundary(ticks in 0i32..(64 * PPQN), n in subdivision()) {
        let value = Beats::from_ticks(ticks);
        let cell = i64::from(PPQN / n as i32);
        let rounded = value.round_to_subdivision(n, RoundMode::Nearest).to_ticks();
        let below = i64::from(ticks) - i64::from(ticks).rem_euclid(cell);
        let distance = (rounded - i64::from(ticks)).abs();
        prop_assert!(distance * 2 <= cell);
        prop_assert!(rounded == below || rounded == below + cell);
    }

    #[test]
    fn snap_is_ceiling_on_power_of_two_grids(value in any_beats(), shift in 0u32..5) {
        let grid = Beats::from_ticks(PPQN >> shift);
        let snapped = value.snap_to(grid);
        prop_assert!(snapped >= value);
        prop_assert!(snapped - value < grid);
    }
}

#[test]
fn documented_subdivision_seed() {
    // 700 ticks sits 220 past the 480 boundary and 260 before 960.
    let rounded = Beats::new(0, 700).round_to_subdivision(4, RoundMode::Nearest);
    assert_eq!(rounded, Beats::new(0, 480));
}

#[test]
fn tolerance_examples() {
    let ppqn = f64::from(PPQN);
    assert!(Beats::new(1, 0) == 1.0 + 0.3 / ppqn);
    assert!(Beats::new(1, 0) != 1.0 + 2.0 / ppqn);
}
