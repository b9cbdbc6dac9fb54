// model = "claude-opus-4-5"
// created = "2026-02-03"
// modified = "2026-02-03"
// driver = "Isaac Clayton"

//! A seeded, deterministic random stream for obfuscation scheduling.
//!
//! The stream decides when storage relocates and when masks rotate, and it
//! supplies the new mask values. It is deliberately not cryptographic: the
//! whole store must be reproducible from its seed so trigger behavior can
//! be replayed in tests. Each draw advances a single u64 counter and mixes
//! it out (SplitMix64), so there is no hidden internal state to get out of
//! sync.

use rand_core::Error;
use rand_core::RngCore;

/// A counter-based pseudo-random stream, seeded once at construction and
/// never reseeded.
#[derive(Clone, Debug)]
pub struct Entropy {
    state: u64,
}

impl Entropy {
    /// Create a stream from a seed. Equal seeds yield equal streams.
    pub fn new(seed: u64) -> Entropy {
        return Entropy { state: seed };
    }

    /// Advance the counter and mix out the next value.
    #[inline]
    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        return z ^ (z >> 31);
    }

    /// Draw a value in `0..bound`.
    pub fn below(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "below() needs a nonzero bound");
        return (self.step() % bound as u64) as u32;
    }
}

impl RngCore for Entropy {
    fn next_u32(&mut self) -> u32 {
        return (self.step() >> 32) as u32;
    }

    fn next_u64(&mut self) -> u64 {
        return self.step();
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        return Ok(());
    }
}
