// model = "claude-opus-4-5"
// created = "2026-02-04"
// modified = "2026-02-05"
// driver = "Isaac Clayton"

//! The protected counter facade.
//!
//! Composes the encoding, the slot arena, and the scheduler behind a plain
//! get/set/add surface. Two rules hold everything together:
//!
//! 1. **Rotation is a transaction.** When the rotation trigger fires, the
//!    current value is decoded under the old key, a new key is drawn, and
//!    the value is re-encoded under the new key before the access
//!    proceeds. A rotated key with stale slots is silent corruption, so
//!    the three steps never run separately.
//!
//! 2. **Writes overwrite every slot.** `set` always encodes into the full
//!    slot array; there is no partial-write path that could leave slots
//!    from two different keys mixed together.
//!
//! The configuration is validated once, at construction. An invalid
//! configuration means the encoding semantics would be undefined, so
//! construction fails rather than guessing; shipping callers `expect` the
//! result.

use crate::codec::Encoding;
use crate::codec::ResidueError;
use crate::codec::ResidueParams;
use crate::scheduler::Access;
use crate::scheduler::Scheduler;
use crate::scheduler::Trigger;
use crate::slots::SlotArray;

/// XOR mask in force before the first rotation.
const INITIAL_XOR_MASK: i64 = 0x0abc_d123;

/// Split key in force before the first rotation.
const INITIAL_SPLIT_KEY: i64 = 0x1234_fedc;

/// Which obfuscation strategy guards the counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardMode {
    /// Store the value as-is. No protection; useful when debugging.
    Plain,
    /// XOR the value with a rotating mask.
    XorMask,
    /// Split the value's bits across two cells by a rotating key.
    BitSplit,
    /// Store residues modulo two coprime bases. The moduli are fixed for
    /// the counter's lifetime and must cover the configured value range.
    Residue { m1: i64, m2: i64 },
}

/// Configuration for a [`ProtectedCounter`], immutable once the counter
/// is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardConfig {
    /// The active obfuscation strategy.
    pub mode: GuardMode,
    /// Stored value = guarded value - offset. Must be 0 in residue mode.
    pub offset: i64,
    /// Upper bound for [`ProtectedCounter::add`]; residue moduli must
    /// cover `0..=max_value`.
    pub max_value: i64,
    /// Expected accesses between mask rotations; 0 = never rotate.
    pub mask_rotation_period: u32,
    /// Whether reads may rotate the mask too, or only writes.
    pub rotate_on_read: bool,
    /// Expected accesses between storage relocations; 0 = never relocate.
    pub relocation_period: u32,
    /// Whether reads may relocate storage too, or only writes.
    pub relocate_on_read: bool,
    /// Seed for the trigger and key stream.
    pub seed: u64,
}

impl GuardConfig {
    /// A quiet configuration: no offset, no rotation, no relocation.
    pub fn new(mode: GuardMode) -> GuardConfig {
        return GuardConfig {
            mode,
            offset: 0,
            max_value: i64::MAX,
            mask_rotation_period: 0,
            rotate_on_read: false,
            relocation_period: 0,
            relocate_on_read: false,
            seed: 0,
        };
    }

    /// Check the configuration invariants without building a counter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.encoding()?;
        return Ok(());
    }

    /// Build the initial encoding state, checking every invariant.
    ///
    /// Residue mode excludes a nonzero offset (the residues encode the
    /// raw value; shifting it would change which range the moduli must
    /// cover), requires coprime moduli, and requires `m1 * m2` to exceed
    /// `max_value` so distinct values cannot decode identically.
    fn encoding(&self) -> Result<Encoding, ConfigError> {
        match self.mode {
            GuardMode::Plain => return Ok(Encoding::Plain),
            GuardMode::XorMask => {
                return Ok(Encoding::XorMask {
                    mask: INITIAL_XOR_MASK,
                });
            }
            GuardMode::BitSplit => {
                return Ok(Encoding::BitSplit {
                    key: INITIAL_SPLIT_KEY,
                });
            }
            GuardMode::Residue { m1, m2 } => {
                if self.offset != 0 {
                    return Err(ConfigError::OffsetWithResidue {
                        offset: self.offset,
                    });
                }
                let params = ResidueParams::new(m1, m2).map_err(ConfigError::Residue)?;
                if params.span() <= self.max_value as i128 {
                    return Err(ConfigError::ResidueRangeTooSmall {
                        m1,
                        m2,
                        max_value: self.max_value,
                    });
                }
                return Ok(Encoding::Residue(params));
            }
        }
    }
}

/// Error returned when a configuration combines incompatible options.
///
/// A counter must never run with ill-defined encoding semantics, so
/// shipping callers treat this as fatal rather than falling back to some
/// other mode the caller did not ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Residue mode stores raw residues; an offset has nowhere to live.
    OffsetWithResidue { offset: i64 },
    /// The residue moduli themselves are unusable.
    Residue(ResidueError),
    /// `m1 * m2` does not cover `0..=max_value`, so distinct values
    /// would decode identically.
    ResidueRangeTooSmall { m1: i64, m2: i64, max_value: i64 },
}

/// A counter that stores its value encoded, re-keyed, and moving.
///
/// Reads take `&mut self`: a read may legitimately relocate storage or
/// rotate the mask when the configuration enables the on-read triggers.
#[derive(Debug)]
pub struct ProtectedCounter {
    offset: i64,
    max_value: i64,
    encoding: Encoding,
    slots: SlotArray,
    scheduler: Scheduler,
    /// Set while a rotation's internal re-encode is on the stack, so the
    /// nested get/set cannot trigger a second rotation.
    rotating: bool,
}

impl ProtectedCounter {
    /// Validate `config`, allocate storage, and store `initial`.
    pub fn new(config: GuardConfig, initial: i64) -> Result<ProtectedCounter, ConfigError> {
        let encoding = config.encoding()?;
        let slots = SlotArray::new(encoding.width());
        let scheduler = Scheduler::new(
            config.seed,
            Trigger {
                period: config.relocation_period,
                on_read: config.relocate_on_read,
            },
            Trigger {
                period: config.mask_rotation_period,
                on_read: config.rotate_on_read,
            },
        );
        let mut counter = ProtectedCounter {
            offset: config.offset,
            max_value: config.max_value,
            encoding,
            slots,
            scheduler,
            rotating: false,
        };
        counter.set(initial);
        return Ok(counter);
    }

    /// Read the guarded value.
    pub fn get(&mut self) -> i64 {
        if self.scheduler.should_relocate(Access::Read) {
            self.slots.relocate();
        }
        self.maybe_rotate(Access::Read);
        return self.decode() + self.offset;
    }

    /// Store a new guarded value, overwriting every slot.
    pub fn set(&mut self, value: i64) {
        let raw = value - self.offset;
        if self.scheduler.should_relocate(Access::Write) {
            self.slots.relocate();
        }
        self.maybe_rotate(Access::Write);
        self.encode(raw);
    }

    /// Add `delta` (which may be negative), saturating into
    /// `[0, max_value]`. Returns the new value.
    pub fn add(&mut self, delta: i64) -> i64 {
        let value = self.get().saturating_add(delta).clamp(0, self.max_value);
        self.set(value);
        return value;
    }

    /// The configured upper bound.
    pub fn max_value(&self) -> i64 {
        return self.max_value;
    }

    /// Rotate the key if the trigger fires: decode under the old key,
    /// draw a new key, re-encode under it, as one transaction. The
    /// `rotating` flag keeps the nested get/set from re-entering; it also
    /// keeps the nested calls from advancing the rotation trigger.
    fn maybe_rotate(&mut self, access: Access) {
        if self.rotating || !self.encoding.has_key() {
            return;
        }
        if !self.scheduler.should_rotate(access) {
            return;
        }
        self.rotating = true;
        let value = self.get();
        self.encoding.rekey(self.scheduler.draw_key());
        self.set(value);
        self.rotating = false;
    }

    fn decode(&self) -> i64 {
        let mut buf = [0i64; 2];
        let width = self.encoding.width();
        for (i, slot) in buf[..width].iter_mut().enumerate() {
            *slot = self.slots.read(i);
        }
        return self.encoding.decode(&buf[..width]);
    }

    fn encode(&mut self, raw: i64) {
        let mut buf = [0i64; 2];
        let width = self.encoding.width();
        self.encoding.encode(raw, &mut buf[..width]);
        for (i, slot) in buf[..width].iter().enumerate() {
            self.slots.write(i, *slot);
        }
    }
}
