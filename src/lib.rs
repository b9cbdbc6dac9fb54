// model = "claude-opus-4-5"
// created = "2026-02-03"
// modified = "2026-02-05"
// driver = "Isaac Clayton"

//! Hoard - an anti-tamper store for sensitive game counters.
//!
//! A memory scanner finds a score counter by searching for its displayed
//! value, changing the score, and searching again. Hoard breaks that loop:
//! the counter is stored encoded (XOR-masked, bit-split across two cells,
//! or as a pair of residues modulo coprime bases), the encoding key
//! rotates at random intervals, and the backing cells migrate to fresh
//! allocations. None of this is cryptography - a human with a debugger
//! wins - but a static cheat table does not.
//!
//! # Quick Start
//!
//! ```
//! use hoard::counter::GuardConfig;
//! use hoard::counter::GuardMode;
//! use hoard::counter::ProtectedCounter;
//!
//! let mut config = GuardConfig::new(GuardMode::Residue { m1: 7639, m2: 8431 });
//! config.max_value = 9999;
//!
//! let mut counter = ProtectedCounter::new(config, 100).unwrap();
//! assert_eq!(counter.get(), 100);
//!
//! assert_eq!(counter.add(50), 150);
//! assert_eq!(counter.get(), 150);
//! ```

pub mod codec;
pub mod counter;
pub mod entropy;
pub mod scheduler;
pub mod slots;
pub mod wallet;
