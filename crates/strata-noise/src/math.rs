//! Single-precision trig table and the rounding helpers generation code relies on.

use std::sync::OnceLock;

use crate::JavaRandom;

const TABLE_SIZE: usize = 65536;

fn sin_table() -> &'static [f32] {
    static TABLE: OnceLock<Vec<f32>> = OnceLock::new();
    TABLE.get_or_init(|| {
        (0..TABLE_SIZE)
            .map(|i| (i as f64 * std::f64::consts::PI * 2.0 / 65536.0).sin() as f32)
            .collect()
    })
}

/// Table sine; `v` in radians.
#[inline]
pub fn sin(v: f32) -> f32 {
    sin_table()[((v * 10430.378) as i32 & 65535) as usize]
}

/// Table cosine; `v` in radians.
#[inline]
pub fn cos(v: f32) -> f32 {
    sin_table()[((v * 10430.378 + 16384.0) as i32 & 65535) as usize]
}

#[inline]
pub fn floor(v: f64) -> i32 {
    let i = v as i32;
    if v < i as f64 { i - 1 } else { i }
}

#[inline]
pub fn floor_f32(v: f32) -> i32 {
    let i = v as i32;
    if v < i as f32 { i - 1 } else { i }
}

#[inline]
pub fn lfloor(v: f64) -> i64 {
    let i = v as i64;
    if v < i as f64 { i - 1 } else { i }
}

/// `lo` below 0, `hi` above 1, linear in between.
#[inline]
pub fn clamped_lerp(lo: f64, hi: f64, t: f64) -> f64 {
    if t < 0.0 {
        lo
    } else if t > 1.0 {
        hi
    } else {
        lo + (hi - lo) * t
    }
}

/// Uniform integer in `[min, max]`, or `min` when the range is empty.
#[inline]
pub fn rand_range(rng: &mut JavaRandom, min: i32, max: i32) -> i32 {
    if min >= max {
        min
    } else {
        rng.next_bounded_int(max - min + 1) + min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_quadrants() {
        assert_eq!(sin(0.0), 0.0);
        assert!((sin(std::f32::consts::FRAC_PI_2) - 1.0).abs() < 1e-4);
        assert!((cos(0.0) - 1.0).abs() < 1e-6);
        assert!((cos(std::f32::consts::PI) + 1.0).abs() < 1e-4);
    }

    #[test]
    fn floor_rounds_down() {
        assert_eq!(floor(-0.5), -1);
        assert_eq!(floor(-1.0), -1);
        assert_eq!(floor(2.999), 2);
        assert_eq!(lfloor(-16777216.5), -16777217);
        assert_eq!(floor_f32(-0.1), -1);
    }

    #[test]
    fn clamped_lerp_saturates() {
        assert_eq!(clamped_lerp(1.0, 3.0, -2.0), 1.0);
        assert_eq!(clamped_lerp(1.0, 3.0, 4.0), 3.0);
        assert_eq!(clamped_lerp(1.0, 3.0, 0.5), 2.0);
    }
}
