//! Transaction deadlines.
//!
//! A deadline is a count of milliseconds since the network's epoch, which
//! sits `epoch_adjustment` seconds after the Unix epoch. Zero is reserved
//! as the "empty" deadline carried by embedded transactions.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the network epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(u64);

impl Deadline {
    /// Placeholder deadline for transactions that do not carry one.
    pub const EMPTY: Self = Self(0);

    /// Longest duration a freshly created deadline may extend into the future.
    pub const MAX_DURATION_SECS: u64 = 24 * 3600;

    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Convert a Unix time in milliseconds into network time.
    pub fn from_unix_millis(unix_millis: u64, epoch_adjustment_secs: u64) -> Self {
        Self(unix_millis.saturating_sub(epoch_adjustment_secs.saturating_mul(1000)))
    }

    /// The current network time.
    pub fn now(epoch_adjustment_secs: u64) -> Self {
        Self::from_unix_millis(unix_now_millis(), epoch_adjustment_secs)
    }

    /// A deadline `duration_secs` from now.
    pub fn create(epoch_adjustment_secs: u64, duration_secs: u64) -> Result<Self, TypesError> {
        Self::create_at(unix_now_millis(), epoch_adjustment_secs, duration_secs)
    }

    /// A deadline `duration_secs` after the given Unix time.
    pub fn create_at(
        now_unix_millis: u64,
        epoch_adjustment_secs: u64,
        duration_secs: u64,
    ) -> Result<Self, TypesError> {
        if duration_secs == 0 || duration_secs > Self::MAX_DURATION_SECS {
            return Err(TypesError::InvalidDeadline(format!(
                "duration must be within 1..={} seconds, got {}",
                Self::MAX_DURATION_SECS,
                duration_secs
            )));
        }
        let now = Self::from_unix_millis(now_unix_millis, epoch_adjustment_secs);
        if now.is_empty() {
            return Err(TypesError::InvalidDeadline(
                "current time is not after the network epoch".into(),
            ));
        }
        Ok(Self(now.0 + duration_secs * 1000))
    }

    /// The Unix time (milliseconds) this deadline corresponds to.
    pub fn to_unix_millis(&self, epoch_adjustment_secs: u64) -> u64 {
        self.0
            .saturating_add(epoch_adjustment_secs.saturating_mul(1000))
    }

    /// Whether this deadline has passed at network time `now`.
    ///
    /// The empty deadline never expires.
    pub fn is_expired(&self, now: Deadline) -> bool {
        !self.is_empty() && now.0 >= self.0
    }

    /// Milliseconds left until expiry at network time `now` (zero once passed).
    pub fn remaining_millis(&self, now: Deadline) -> u64 {
        self.0.saturating_sub(now.0)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

fn unix_now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPOCH_ADJUSTMENT: u64 = 1_615_853_185;

    #[test]
    fn create_at_offsets_from_network_epoch() {
        let now_unix = (EPOCH_ADJUSTMENT + 100) * 1000;
        let deadline = Deadline::create_at(now_unix, EPOCH_ADJUSTMENT, 7200).unwrap();
        assert_eq!(deadline.as_millis(), (100 + 7200) * 1000);
        assert_eq!(
            deadline.to_unix_millis(EPOCH_ADJUSTMENT),
            now_unix + 7200 * 1000
        );
    }

    #[test]
    fn duration_bounds_enforced() {
        let now_unix = (EPOCH_ADJUSTMENT + 1) * 1000;
        assert!(Deadline::create_at(now_unix, EPOCH_ADJUSTMENT, 0).is_err());
        assert!(Deadline::create_at(now_unix, EPOCH_ADJUSTMENT, 24 * 3600).is_ok());
        assert!(Deadline::create_at(now_unix, EPOCH_ADJUSTMENT, 24 * 3600 + 1).is_err());
    }

    #[test]
    fn clock_before_epoch_rejected() {
        assert!(Deadline::create_at(1000, EPOCH_ADJUSTMENT, 60).is_err());
    }

    #[test]
    fn empty_never_expires() {
        assert!(!Deadline::EMPTY.is_expired(Deadline::new(u64::MAX)));
        assert!(Deadline::new(10).is_expired(Deadline::new(10)));
        assert!(!Deadline::new(10).is_expired(Deadline::new(9)));
    }
}
