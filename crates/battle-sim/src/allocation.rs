//! Allocation engine: unit record -> defensive capacity -> per-lane tokens.
//!
//! All arithmetic after `total_capacity` is integral so the result is exact
//! and reproducible for a given total.

use battle_core::constants::{LANE_COUNT, LANE_TOKEN_CAP, LANE_WEIGHTS_PERCENT};

/// Tokens per lane, in `Lane::ALL` order.
pub type LaneAllocation = [u32; LANE_COUNT];

/// Defensive capacity bought by `units` net units: zero for non-positive
/// records, otherwise `units / units_per_capacity` rounded up.
pub fn total_capacity(units: f64, units_per_capacity: f64) -> u32 {
    if units.is_nan() || units <= 0.0 || units_per_capacity.is_nan() || units_per_capacity <= 0.0 {
        return 0;
    }
    let capacity = (units / units_per_capacity).ceil();
    if capacity >= u32::MAX as f64 {
        u32::MAX
    } else {
        capacity as u32
    }
}

/// Largest-remainder apportionment of `total` tokens over the five lanes.
///
/// With fewer tokens than lanes, lanes get one each in lane order. Otherwise
/// every lane gets one base token, the rest is split by
/// `LANE_WEIGHTS_PERCENT` and floored, and the units lost to flooring go one
/// at a time to the largest fractional remainders (lower lane wins ties).
/// No lane exceeds `LANE_TOKEN_CAP`; overflow moves on to the next lane in
/// remainder order that still has room, so the sum is
/// `min(total, LANE_COUNT * LANE_TOKEN_CAP)`.
pub fn distribute(total: u32) -> LaneAllocation {
    let mut counts = [0u32; LANE_COUNT];
    let lanes = LANE_COUNT as u32;

    if total < lanes {
        for count in counts.iter_mut().take(total as usize) {
            *count = 1;
        }
        return counts;
    }

    counts = [1; LANE_COUNT];
    let remainder = total - lanes;
    let mut leftover = remainder;
    let mut fractions = [0u64; LANE_COUNT];

    for (lane, count) in counts.iter_mut().enumerate() {
        let share = remainder as u64 * LANE_WEIGHTS_PERCENT[lane] as u64;
        fractions[lane] = share % 100;
        let whole = (share / 100).min(u32::MAX as u64) as u32;
        let granted = whole.min(LANE_TOKEN_CAP.saturating_sub(*count));
        *count += granted;
        leftover -= granted;
    }

    let mut order: [usize; LANE_COUNT] = std::array::from_fn(|i| i);
    order.sort_by(|&a, &b| fractions[b].cmp(&fractions[a]).then(a.cmp(&b)));

    while leftover > 0 {
        let mut placed = false;
        for &lane in &order {
            if leftover == 0 {
                break;
            }
            if counts[lane] < LANE_TOKEN_CAP {
                counts[lane] += 1;
                leftover -= 1;
                placed = true;
            }
        }
        if !placed {
            break;
        }
    }

    counts
}

/// Convenience: `distribute(total_capacity(units, ratio))`.
pub fn allocate(units: f64, units_per_capacity: f64) -> LaneAllocation {
    distribute(total_capacity(units, units_per_capacity))
}
