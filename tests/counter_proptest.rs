// model = "claude-opus-4-5"
// created = 2026-02-05
// modified = 2026-02-05
// driver = "Isaac Clayton"

//! Property-based tests for the protected counter.
//!
//! Two families: round-trip properties per encoding mode, and model-based
//! random workloads where the counter (with every trigger firing on every
//! access) must track a plain integer exactly.

use proptest::prelude::*;

use hoard::codec::gcd;
use hoard::counter::GuardConfig;
use hoard::counter::GuardMode;
use hoard::counter::ProtectedCounter;

// =============================================================================
// Test helpers
// =============================================================================

const COIN_MAX: i64 = 9999;

fn guard_mode() -> impl Strategy<Value = GuardMode> {
    return prop_oneof![
        Just(GuardMode::Plain),
        Just(GuardMode::XorMask),
        Just(GuardMode::BitSplit),
        Just(GuardMode::Residue { m1: 7639, m2: 8431 }),
    ];
}

/// One step of a random workload.
#[derive(Clone, Debug)]
enum CoinOp {
    Set(i64),
    Add(i64),
    Check,
}

fn coin_op() -> impl Strategy<Value = CoinOp> {
    return prop_oneof![
        (0i64..=COIN_MAX).prop_map(CoinOp::Set),
        (-500i64..=500).prop_map(CoinOp::Add),
        Just(CoinOp::Check),
    ];
}

/// A counter with every trigger firing on every access.
fn churning(mode: GuardMode, seed: u64) -> ProtectedCounter {
    let mut config = GuardConfig::new(mode);
    config.max_value = COIN_MAX;
    config.mask_rotation_period = 1;
    config.rotate_on_read = true;
    config.relocation_period = 1;
    config.relocate_on_read = true;
    config.seed = seed;
    return ProtectedCounter::new(config, 0).unwrap();
}

// =============================================================================
// Round-trip properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// set(v) then get() returns v in every mode, triggers quiet.
    #[test]
    fn set_get_round_trips(mode in guard_mode(), value in 0i64..=COIN_MAX) {
        let mut config = GuardConfig::new(mode);
        config.max_value = COIN_MAX;
        let mut counter = ProtectedCounter::new(config, 0).unwrap();
        counter.set(value);
        prop_assert_eq!(counter.get(), value);
    }

    /// The offset is invisible at the surface for the offset-capable modes.
    #[test]
    fn offset_is_transparent(
        mode in prop_oneof![
            Just(GuardMode::Plain),
            Just(GuardMode::XorMask),
            Just(GuardMode::BitSplit),
        ],
        offset in -10_000i64..=10_000,
        value in 0i64..=COIN_MAX,
    ) {
        let mut config = GuardConfig::new(mode);
        config.max_value = COIN_MAX;
        config.offset = offset;
        let mut counter = ProtectedCounter::new(config, 0).unwrap();
        counter.set(value);
        prop_assert_eq!(counter.get(), value);
    }

    /// Any coprime moduli pair covering the range round-trips exactly.
    #[test]
    fn arbitrary_coprime_moduli_round_trip(
        m1 in 100i64..20_000,
        m2 in 100i64..20_000,
        value in 0i64..=COIN_MAX,
    ) {
        prop_assume!(gcd(m1, m2) == 1);
        prop_assume!(m1 * m2 > COIN_MAX);

        let mut config = GuardConfig::new(GuardMode::Residue { m1, m2 });
        config.max_value = COIN_MAX;
        let mut counter = ProtectedCounter::new(config, 0).unwrap();
        counter.set(value);
        prop_assert_eq!(counter.get(), value);
    }
}

// =============================================================================
// Model-based workloads
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Under maximum churn, the counter tracks a plain integer model
    /// through arbitrary set/add/get interleavings.
    #[test]
    fn churning_counter_tracks_the_model(
        mode in guard_mode(),
        seed in any::<u64>(),
        ops in prop::collection::vec(coin_op(), 1..100),
    ) {
        let mut counter = churning(mode, seed);
        let mut model: i64 = 0;

        for op in &ops {
            match op {
                CoinOp::Set(value) => {
                    counter.set(*value);
                    model = *value;
                }
                CoinOp::Add(delta) => {
                    let result = counter.add(*delta);
                    model = (model + *delta).clamp(0, COIN_MAX);
                    prop_assert_eq!(result, model);
                }
                CoinOp::Check => {}
            }
            prop_assert_eq!(counter.get(), model);
        }
    }

    /// A quiet counter and a churning counter agree on every workload:
    /// scheduling is invisible at the surface.
    #[test]
    fn scheduling_is_surface_invisible(
        mode in guard_mode(),
        seed in any::<u64>(),
        ops in prop::collection::vec(coin_op(), 1..100),
    ) {
        let mut config = GuardConfig::new(mode);
        config.max_value = COIN_MAX;
        let mut quiet = ProtectedCounter::new(config, 0).unwrap();
        let mut churn = churning(mode, seed);

        for op in &ops {
            match op {
                CoinOp::Set(value) => {
                    quiet.set(*value);
                    churn.set(*value);
                }
                CoinOp::Add(delta) => {
                    prop_assert_eq!(quiet.add(*delta), churn.add(*delta));
                }
                CoinOp::Check => {}
            }
            prop_assert_eq!(quiet.get(), churn.get());
        }
    }
}
