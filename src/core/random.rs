//! Bounded uniform draws shared by the sampler and the scheduler.

use chrono::NaiveTime;
use rand::Rng;

/// Uniform integer in `[min, max]`, both inclusive. Bounds are swapped if
/// given in the wrong order.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

/// Clock time with the hour in `[hour_min, hour_max]` and the minute on a
/// 10-minute boundary.
pub fn random_time<R: Rng + ?Sized>(rng: &mut R, hour_min: u32, hour_max: u32) -> NaiveTime {
    let hour = random_between(rng, hour_min, hour_max.min(23));
    let minute = random_between(rng, 0, 5) * 10;
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// In-place Fisher-Yates shuffle: `i` from the last index down to 1, swap
/// with a uniform `j` in `[0, i]`.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
