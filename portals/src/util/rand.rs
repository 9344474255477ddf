//! Java-compatible pseudo-random number generator, the world's random source used to
//! draw frame blocks and fire portal axes.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{UNIX_EPOCH, SystemTime};
use std::num::Wrapping;


const MULTIPLIER: Wrapping<i64> = Wrapping(0x5DEECE66D);
const ADDEND: Wrapping<i64> = Wrapping(0xB);
const MASK: Wrapping<i64> = Wrapping((1 << 48) - 1);


/// Generate a new seed in the same way as `java.util.Random` (same constants), each
/// call returning a different seed mixed with the system time.
fn gen_seed() -> i64 {
    static SEED: AtomicI64 = AtomicI64::new(8682522807148012);
    let mut current = SEED.load(Ordering::Relaxed);
    loop {
        let next = current.wrapping_mul(181783497276652981);
        match SEED.compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => {
                return match SystemTime::now().duration_since(UNIX_EPOCH) {
                    Ok(d) => next ^ (d.as_nanos() as i64),
                    Err(_) => next
                };
            }
            Err(old) => current = old
        }
    }
}

#[derive(Debug, Clone)]
pub struct JavaRandom {
    seed: Wrapping<i64>
}

impl Default for JavaRandom {
    fn default() -> Self {
        Self::new_seeded()
    }
}

impl JavaRandom {

    #[inline]
    pub fn new(seed: i64) -> JavaRandom {
        JavaRandom { seed: (Wrapping(seed) ^ MULTIPLIER) & MASK }
    }

    #[inline]
    pub fn new_seeded() -> JavaRandom {
        Self::new(gen_seed())
    }

    #[inline]
    fn next(&mut self, bits: u8) -> i32 {
        self.seed = (self.seed * MULTIPLIER + ADDEND) & MASK;
        (self.seed.0 as u64 >> (48 - bits)) as i32
    }

    /// Get the next pseudo-random integer in `0..bound`, the bound must be positive.
    pub fn next_int_bounded(&mut self, bound: i32) -> i32 {

        debug_assert!(bound > 0, "bound must be positive");

        if (bound & -bound) == bound {
            return (((bound as i64).wrapping_mul(self.next(31) as i64)) >> 31) as i32;
        }

        loop {
            let bits = self.next(31);
            let val = bits.rem_euclid(bound);
            if bits.wrapping_sub(val).wrapping_add(bound - 1) >= 0 {
                break val;
            }
        }

    }

    /// Randomly pick an item in the given slice, panics if the slice is empty.
    /// **This is not part of the standard Java class.**
    #[inline]
    pub fn next_choice<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.next_int_bounded(items.len() as i32) as usize]
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn java_sequence() {
        // Values produced by `new java.util.Random(42).nextInt(10)`.
        let mut rand = JavaRandom::new(42);
        let values: Vec<i32> = (0..5).map(|_| rand.next_int_bounded(10)).collect();
        assert_eq!(values, [0, 3, 8, 4, 0]);
    }

    #[test]
    fn choice_in_slice() {
        let mut rand = JavaRandom::new(0);
        for _ in 0..32 {
            assert!(matches!(rand.next_choice(&[3u8, 5, 7]), 3 | 5 | 7));
        }
    }

}
