const MULTIPLIER: i64 = 0x5DEECE66D;
const ADDEND: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;
const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

/// 48-bit linear congruential generator with the exact draw semantics of
/// `java.util.Random`. Not shared between threads: every task owns one.
#[derive(Clone, Debug)]
pub struct JavaRandom {
    state: i64,
    next_gaussian: Option<f64>,
}

impl JavaRandom {
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed ^ MULTIPLIER) & MASK,
            next_gaussian: None,
        }
    }

    pub fn set_seed(&mut self, seed: i64) {
        self.state = (seed ^ MULTIPLIER) & MASK;
        self.next_gaussian = None;
    }

    #[inline]
    fn next(&mut self, bits: u32) -> i32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.state >> (48 - bits)) as i32
    }

    #[inline]
    pub fn next_int(&mut self) -> i32 {
        self.next(32)
    }

    /// Uniform value in `[0, bound)`. A non-positive bound yields 0.
    pub fn next_bounded_int(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "bound must be positive");
        if bound <= 0 {
            return 0;
        }
        if bound & bound.wrapping_neg() == bound {
            return ((bound as i64 * self.next(31) as i64) >> 31) as i32;
        }
        loop {
            let bits = self.next(31);
            let val = bits % bound;
            if bits.wrapping_sub(val).wrapping_add(bound - 1) >= 0 {
                return val;
            }
        }
    }

    #[inline]
    pub fn next_long(&mut self) -> i64 {
        let hi = (self.next(32) as i64) << 32;
        hi.wrapping_add(self.next(32) as i64)
    }

    #[inline]
    pub fn next_bool(&mut self) -> bool {
        self.next(1) != 0
    }

    #[inline]
    pub fn next_float(&mut self) -> f32 {
        self.next(24) as f32 * FLOAT_UNIT
    }

    #[inline]
    pub fn next_double(&mut self) -> f64 {
        let hi = (self.next(26) as i64) << 27;
        (hi + self.next(27) as i64) as f64 * DOUBLE_UNIT
    }

    pub fn next_gaussian(&mut self) -> f64 {
        if let Some(g) = self.next_gaussian.take() {
            return g;
        }
        loop {
            let v1 = 2.0 * self.next_double() - 1.0;
            let v2 = 2.0 * self.next_double() - 1.0;
            let s = v1 * v1 + v2 * v2;
            if s < 1.0 && s != 0.0 {
                let multiplier = (-2.0 * s.ln() / s).sqrt();
                self.next_gaussian = Some(v2 * multiplier);
                return v1 * multiplier;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_seed_resets_sequence() {
        let mut a = JavaRandom::new(42);
        let first = a.next_long();
        a.next_double();
        a.set_seed(42);
        assert_eq!(a.next_long(), first);
    }

    #[test]
    fn bounded_stays_in_range() {
        let mut r = JavaRandom::new(-7);
        for bound in [1, 2, 3, 7, 16, 100, 1 << 30, i32::MAX] {
            for _ in 0..200 {
                let v = r.next_bounded_int(bound);
                assert!((0..bound).contains(&v));
            }
        }
    }
}
