// model = "claude-opus-4-5"
// created = "2026-02-04"
// modified = "2026-02-04"
// driver = "Isaac Clayton"

//! Probabilistic rekey and relocation triggers.
//!
//! Obfuscation that changes on a fixed cadence is itself a scannable
//! pattern, so both triggers are stochastic: each fires with probability
//! `1/period` per evaluated access. A period of 0 disables a trigger
//! outright. Reads evaluate a trigger only when its on-read flag is set;
//! a disabled read leaves the random stream untouched, so probe-only
//! reads never perturb scheduling.

use rand_core::RngCore;

use crate::entropy::Entropy;

/// The kind of access being made to the counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// One probabilistic trigger: fires with probability `1/period`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trigger {
    /// Expected accesses between firings; 0 disables the trigger.
    pub period: u32,
    /// Whether reads evaluate this trigger too, or only writes.
    pub on_read: bool,
}

impl Trigger {
    /// A trigger that never fires.
    pub fn never() -> Trigger {
        return Trigger {
            period: 0,
            on_read: false,
        };
    }

    /// Whether this trigger is evaluated at all for the given access.
    fn armed(&self, access: Access) -> bool {
        if self.period == 0 {
            return false;
        }
        return access == Access::Write || self.on_read;
    }
}

/// Decides, per access, whether storage relocates and whether the mask
/// rotates. Also the stream every new mask or split key is drawn from.
#[derive(Clone, Debug)]
pub struct Scheduler {
    rng: Entropy,
    relocation: Trigger,
    rotation: Trigger,
}

impl Scheduler {
    /// Create a scheduler with a seeded stream and two triggers.
    pub fn new(seed: u64, relocation: Trigger, rotation: Trigger) -> Scheduler {
        return Scheduler {
            rng: Entropy::new(seed),
            relocation,
            rotation,
        };
    }

    /// Evaluate the relocation trigger for one access.
    pub fn should_relocate(&mut self, access: Access) -> bool {
        return self.fire(self.relocation, access);
    }

    /// Evaluate the rotation trigger for one access.
    pub fn should_rotate(&mut self, access: Access) -> bool {
        return self.fire(self.rotation, access);
    }

    /// Draw a fresh mask or split key.
    pub fn draw_key(&mut self) -> i64 {
        return self.rng.next_u64() as i64;
    }

    fn fire(&mut self, trigger: Trigger, access: Access) -> bool {
        if !trigger.armed(access) {
            return false;
        }
        return self.rng.below(trigger.period) == 0;
    }
}
