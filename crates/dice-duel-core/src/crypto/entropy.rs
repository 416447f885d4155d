//! Entropy source behind every random draw of a duel.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Source of secret randomness.
///
/// Failures are surfaced, never retried.
pub trait Entropy {
    /// Fill `dest` with random bytes
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error>;

    /// Uniform integer in `[0, modulus)`, rejection sampled.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero.
    fn below(&mut self, modulus: u32) -> Result<u32, rand::Error> {
        assert!(modulus > 0, "modulus must be positive");
        // Largest multiple of `modulus` that fits; draws at or above it are biased.
        let limit = u32::MAX - (u32::MAX % modulus);
        loop {
            let mut buf = [0u8; 4];
            self.fill_bytes(&mut buf)?;
            let draw = u32::from_le_bytes(buf);
            if draw < limit {
                return Ok(draw % modulus);
            }
        }
    }
}

/// Entropy backed by a cryptographically secure RNG
#[derive(Clone, Debug, Default)]
pub struct SystemEntropy<R = OsRng>(R);

impl SystemEntropy<OsRng> {
    /// Entropy straight from the operating system
    pub fn os() -> Self {
        Self(OsRng)
    }
}

impl<R: RngCore + CryptoRng> SystemEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: RngCore + CryptoRng> Entropy for SystemEntropy<R> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_below_stays_in_range() {
        let mut entropy = SystemEntropy::new(StdRng::seed_from_u64(7));
        for modulus in [1, 2, 3, 6, 7, 100] {
            for _ in 0..200 {
                assert!(entropy.below(modulus).unwrap() < modulus);
            }
        }
    }

    #[test]
    fn test_below_covers_every_value() {
        let mut entropy = SystemEntropy::new(StdRng::seed_from_u64(42));
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[entropy.below(6).unwrap() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_os_entropy_fills_bytes() {
        let mut entropy = SystemEntropy::os();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        entropy.fill_bytes(&mut a).unwrap();
        entropy.fill_bytes(&mut b).unwrap();
        assert_ne!(a, b);
    }
}
