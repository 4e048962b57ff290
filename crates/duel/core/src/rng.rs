//! Deterministic pseudorandom stream for match resolution.
//!
//! Every random decision in a match is a single draw from one [`SeededRng`]
//! stream. Given the same seed the stream is identical on every machine,
//! which is what makes a `(snapshot, seed)` pair fully replayable.
//!
//! # Determinism
//!
//! The generator is a 32-bit multiply–xorshift recurrence (mulberry32). It
//! uses no external entropy, never allocates, and has no platform-dependent
//! behavior: all arithmetic is wrapping integer math plus one exact
//! `u32 -> f64` conversion.

/// Seed for a match RNG stream.
///
/// Integer seeds are used directly; string seeds are hashed to 32 bits with
/// a non-cryptographic avalanche hash (FNV-1a folded through a final
/// xorshift-multiply mix).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seed(pub u32);

impl Seed {
    /// Hash an arbitrary string to a 32-bit seed.
    ///
    /// FNV-1a over the UTF-8 bytes, then one avalanche pass so that short
    /// or similar strings still land far apart in seed space.
    pub fn from_text(text: &str) -> Self {
        let mut h: u32 = 0x811C_9DC5;
        for byte in text.bytes() {
            h ^= u32::from(byte);
            h = h.wrapping_mul(0x0100_0193);
        }
        h ^= h >> 16;
        h = h.wrapping_mul(0x7FEB_352D);
        h ^= h >> 15;
        h = h.wrapping_mul(0x846C_A68B);
        h ^= h >> 16;
        Self(h)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Self::from_text(value)
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Self::from_text(&value)
    }
}

/// Deterministic pseudorandom stream.
///
/// State is a single `u32`; each draw advances the state once. Child
/// streams can be split off with [`SeededRng::fork`], which consumes
/// exactly one draw from the parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Mulberry32 state increment.
    const INCREMENT: u32 = 0x6D2B_79F5;

    pub fn new(seed: impl Into<Seed>) -> Self {
        Self {
            state: seed.into().0,
        }
    }

    /// Advance the state and produce the next raw 32-bit output.
    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.step()) / 4_294_967_296.0
    }

    /// Uniform integer in `[lo, hi]` inclusive.
    ///
    /// Returns `lo` without consuming a draw when `hi <= lo`.
    pub fn int_between(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = f64::from(hi - lo + 1);
        lo + (self.next_f64() * span) as u32
    }

    /// Percentage roll in `[1, 100]`.
    pub fn percent(&mut self) -> u32 {
        self.int_between(1, 100)
    }

    /// One uniform draw in `[0, 100)` tested against an integer chance.
    ///
    /// Always consumes exactly one draw, even for chance 0 or 100, so the
    /// stream shape does not depend on the configured chance.
    pub fn roll_under_pct(&mut self, chance: u32) -> bool {
        self.next_f64() * 100.0 < f64::from(chance)
    }

    /// Weighted pick: one draw, linear scan, first item whose cumulative
    /// weight exceeds the draw.
    ///
    /// Returns `None` (consuming nothing) when the list is empty or all
    /// weights are zero.
    pub fn weighted_pick<'a, T>(&mut self, items: &'a [(T, u32)]) -> Option<&'a T> {
        let total: u64 = items.iter().map(|(_, w)| u64::from(*w)).sum();
        if total == 0 {
            return None;
        }
        let draw = self.next_f64() * total as f64;
        let mut cumulative = 0u64;
        for (item, weight) in items {
            cumulative += u64::from(*weight);
            if cumulative as f64 > draw {
                return Some(item);
            }
        }
        // Floating-point edge: the draw can only fail the scan if it rounds
        // up to exactly `total`; the last weighted item wins.
        items.iter().rev().find(|(_, w)| *w > 0).map(|(item, _)| item)
    }

    /// Derive a child stream, consuming exactly one parent draw.
    pub fn fork(&mut self) -> SeededRng {
        SeededRng { state: self.step() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_seed_identical_stream() {
        let mut a = SeededRng::new(0xDEAD_BEEF);
        let mut b = SeededRng::new(0xDEAD_BEEF);
        for _ in 0..1000 {
            assert_eq!(a.step(), b.step());
        }
    }

    #[test]
    fn raw_stream_pinned() {
        // Regression pins: these values must never change, or every stored
        // match replay breaks.
        let mut rng = SeededRng::new(1);
        let first: Vec<u32> = (0..5).map(|_| rng.step()).collect();
        assert_eq!(
            first,
            vec![2693262067, 11749833, 2265367787, 4213581821, 4159151403]
        );

        let mut rng = SeededRng::new(12345);
        let first: Vec<u32> = (0..5).map(|_| rng.step()).collect();
        assert_eq!(
            first,
            vec![4207900869, 1317490944, 2079646450, 3513001552, 2187978186]
        );
    }

    #[test]
    fn text_seed_pinned() {
        assert_eq!(Seed::from("alice-vs-bob").0, 3128165217);
        assert_eq!(Seed::from("duel").0, 608664762);
        assert_eq!(Seed::from("").0, 1947474976);
    }

    #[test]
    fn int_between_bounds() {
        let mut rng = SeededRng::new(99);
        for _ in 0..2000 {
            let v = rng.int_between(5, 10);
            assert!((5..=10).contains(&v));
        }
    }

    #[test]
    fn int_between_degenerate_range() {
        let mut rng = SeededRng::new(3);
        let before = rng.clone();
        assert_eq!(rng.int_between(7, 7), 7);
        assert_eq!(rng.int_between(9, 2), 9);
        // No draws consumed.
        assert_eq!(rng, before);
    }

    #[test]
    fn percent_bounds_pinned() {
        let mut rng = SeededRng::new(7);
        let rolls: Vec<u32> = (0..3).map(|_| rng.percent()).collect();
        assert_eq!(rolls, vec![2, 7, 98]);
        for _ in 0..2000 {
            let v = rng.percent();
            assert!((1..=100).contains(&v));
        }
    }

    #[test]
    fn roll_under_pct_extremes() {
        let mut rng = SeededRng::new(21);
        for _ in 0..100 {
            assert!(!rng.roll_under_pct(0));
        }
        for _ in 0..100 {
            assert!(rng.roll_under_pct(100));
        }
    }

    #[test]
    fn weighted_pick_first_cumulative_winner() {
        // seed 42 first draw is ~0.6011, so with weights 10/30/60 the draw
        // value 60.11 lands inside the third bucket (cumulative 100 > 60.11,
        // cumulative 40 does not).
        let items = [("light", 10u32), ("medium", 30), ("heavy", 60)];
        let mut rng = SeededRng::new(42);
        assert_eq!(rng.weighted_pick(&items), Some(&"heavy"));
    }

    #[test]
    fn weighted_pick_empty_and_zero_weights() {
        let mut rng = SeededRng::new(5);
        let before = rng.clone();
        let empty: [(&str, u32); 0] = [];
        assert_eq!(rng.weighted_pick(&empty), None);
        assert_eq!(rng.weighted_pick(&[("a", 0u32), ("b", 0)]), None);
        assert_eq!(rng, before);
    }

    #[test]
    fn fork_consumes_one_parent_draw() {
        let mut parent = SeededRng::new(1);
        let mut reference = SeededRng::new(1);
        let first = reference.step();

        let child = parent.fork();
        assert_eq!(child, SeededRng::new(first));
        // Parent continues from the second draw.
        assert_eq!(parent.step(), reference.step());
    }
}
