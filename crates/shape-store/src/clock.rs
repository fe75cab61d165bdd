use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use crate::errors::StoreError;

/// Source of wall-clock time for timestamps and ids.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, time: DateTime<Utc>) {
        self.now.set(time);
    }

    pub fn advance_millis(&self, millis: i64) {
        self.now.set(self.now.get() + Duration::milliseconds(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// A millisecond-timestamp id that is strictly greater than `after`.
///
/// Two ids requested within the same millisecond, or after the clock
/// stepped backwards, still come out distinct and increasing. Fails only
/// when `after` is already `i64::MAX`.
pub fn timestamp_id(now: DateTime<Utc>, after: Option<i64>) -> Result<i64, StoreError> {
    let millis = now.timestamp_millis();
    match after {
        Some(last) if millis <= last => last
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted { last }),
        _ => Ok(millis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_id_uses_clock_when_ahead() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        assert_eq!(timestamp_id(now, None), Ok(1_000));
        assert_eq!(timestamp_id(now, Some(500)), Ok(1_000));
    }

    #[test]
    fn timestamp_id_bumps_on_collision() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        assert_eq!(timestamp_id(now, Some(1_000)), Ok(1_001));
        assert_eq!(timestamp_id(now, Some(2_000)), Ok(2_001));
    }

    #[test]
    fn timestamp_id_fails_past_max() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        assert_eq!(
            timestamp_id(now, Some(i64::MAX)),
            Err(StoreError::IdsExhausted { last: i64::MAX })
        );
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(Utc.timestamp_millis_opt(0).unwrap());
        let other = clock.clone();
        clock.advance_millis(250);
        assert_eq!(other.now().timestamp_millis(), 250);
    }
}
