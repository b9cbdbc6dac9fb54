// model = "claude-opus-4-5"
// created = "2026-02-05"
// modified = "2026-02-05"
// driver = "Isaac Clayton"

//! The owning game-state layer around the protected counter.
//!
//! Tracks the player's coin purse the way the game expects: clamped to
//! `[0, MAX_COINS]`, taxed at checkpoints, reset on new game, and saved
//! as a plain decoded integer. The encoded in-memory form never crosses
//! the save boundary; loading re-encodes from scratch.
//!
//! Audio stays with the caller: `add_coins` only *selects* a cue, it
//! plays nothing.

use std::time::Duration;
use std::time::Instant;

use crate::counter::ConfigError;
use crate::counter::GuardConfig;
use crate::counter::GuardMode;
use crate::counter::ProtectedCounter;

/// Coins a fresh game starts with.
pub const START_COINS: i64 = 100;

/// Hard cap on the coin counter.
pub const MAX_COINS: i64 = 9999;

/// Minimum gap between consecutive ordinary coin cues.
const COIN_SOUND_GAP: Duration = Duration::from_millis(10);

/// Which cue the caller should play for a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoinSound {
    /// Ordinary pickup.
    Coin,
    /// Large pickup, 100 coins or more.
    LifeUp,
}

/// A player's coin purse, guarded against memory scanners.
#[derive(Debug)]
pub struct Wallet {
    counter: ProtectedCounter,
    last_coin_sound: Option<Instant>,
}

impl Wallet {
    /// A wallet with the shipped guard: residue encoding over the bases
    /// 7639 and 8431, starting at [`START_COINS`].
    pub fn new() -> Wallet {
        let mut config = GuardConfig::new(GuardMode::Residue { m1: 7639, m2: 8431 });
        config.max_value = MAX_COINS;
        return Wallet::with_config(config).expect("shipped guard configuration is valid");
    }

    /// A wallet with a custom guard configuration. The caller decides how
    /// to handle a bad configuration; the game treats it as fatal.
    pub fn with_config(config: GuardConfig) -> Result<Wallet, ConfigError> {
        let counter = ProtectedCounter::new(config, START_COINS)?;
        return Ok(Wallet {
            counter,
            last_coin_sound: None,
        });
    }

    /// Current coin count.
    pub fn coins(&mut self) -> i64 {
        return self.counter.get();
    }

    /// Set the coin count, clamped to `[0, MAX_COINS]`.
    pub fn set_coins(&mut self, coins: i64) {
        self.counter.set(coins.clamp(0, MAX_COINS));
    }

    /// Add (or, with a negative count, remove) coins, saturating at the
    /// cap and at zero.
    ///
    /// When `play_sound` is set, returns the cue the caller should play:
    /// a life-up for pickups of 100 or more, an ordinary coin cue
    /// otherwise. Ordinary cues are rate-limited so a coin shower does
    /// not fire one per coin.
    pub fn add_coins(&mut self, count: i64, play_sound: bool) -> Option<CoinSound> {
        self.counter.add(count);

        if !play_sound || count <= 0 {
            return None;
        }
        if count >= 100 {
            return Some(CoinSound::LifeUp);
        }

        let now = Instant::now();
        if let Some(last) = self.last_coin_sound {
            if now.duration_since(last) < COIN_SOUND_GAP {
                return None;
            }
        }
        self.last_coin_sound = Some(now);
        return Some(CoinSound::Coin);
    }

    /// Deduct the checkpoint tax: a tenth of the purse, but at least 25
    /// coins, flooring at zero.
    pub fn take_checkpoint_coins(&mut self) {
        let coins = self.coins();
        let tax = (coins / 10).max(25);
        self.set_coins((coins - tax).max(0));
    }

    /// Restore the purse to a fresh game.
    pub fn reset(&mut self) {
        self.set_coins(START_COINS);
    }

    /// The decoded value for the save file. Only this plain integer is
    /// persisted; the encoded slots never are.
    pub fn snapshot(&mut self) -> i64 {
        return self.coins();
    }

    /// Rebuild the in-memory encoding from a saved value.
    pub fn restore(&mut self, coins: i64) {
        self.set_coins(coins);
    }
}

impl Default for Wallet {
    fn default() -> Self {
        return Self::new();
    }
}
