// This library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this library.  If not, see <http://www.gnu.org/licenses/>.
//! Software time of day, kept between RTC reads.
//!
//! Same idea as the Arduino Time library: remember what the RTC said and
//! when, then advance by elapsed `millis()`.

use crate::ds3231::DateTime;

const SECS_PER_DAY: u32 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStatus {
    /// Never synced.
    NotSet,
    /// Synced, but longer ago than the sync interval.
    NeedsSync,
    Set,
}

#[derive(Debug, Clone)]
pub struct SystemClock {
    base: Option<DateTime>,
    synced_at_ms: u32,
    sync_interval_ms: u32,
}

impl SystemClock {
    #[must_use]
    pub fn new(sync_interval_secs: u32) -> Self {
        Self {
            base: None,
            synced_at_ms: 0,
            sync_interval_ms: sync_interval_secs.saturating_mul(1000),
        }
    }

    pub fn sync(&mut self, time: DateTime, now_ms: u32) {
        self.base = Some(time);
        self.synced_at_ms = now_ms;
    }

    pub fn status(&self, now_ms: u32) -> TimeStatus {
        match self.base {
            None => TimeStatus::NotSet,
            Some(_) if now_ms.wrapping_sub(self.synced_at_ms) >= self.sync_interval_ms => {
                TimeStatus::NeedsSync
            }
            Some(_) => TimeStatus::Set,
        }
    }

    /// Current time, or `None` before the first sync.
    ///
    /// Seconds roll into minutes, hours and the weekday.  The date fields
    /// stay as last read until the next sync.
    pub fn now(&self, now_ms: u32) -> Option<DateTime> {
        let base = self.base?;
        let elapsed = now_ms.wrapping_sub(self.synced_at_ms) / 1000;

        let of_day = u32::from(base.hour) * 3600
            + u32::from(base.minute) * 60
            + u32::from(base.second)
            + elapsed;
        let days = of_day / SECS_PER_DAY;
        let of_day = of_day % SECS_PER_DAY;

        let day_of_week = match base.day_of_week {
            d @ 1..=7 => ((u32::from(d) - 1 + days) % 7) as u8 + 1,
            d => d,
        };

        Some(DateTime {
            second: (of_day % 60) as u8,
            minute: (of_day / 60 % 60) as u8,
            hour: (of_day / 3600) as u8,
            day_of_week,
            ..base
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon_tuesday() -> DateTime {
        DateTime {
            second: 0,
            minute: 0,
            hour: 12,
            day_of_week: 3,
            day_of_month: 14,
            month: 11,
            year: 23,
        }
    }

    #[test]
    fn status_follows_sync() {
        let mut clock = SystemClock::new(300);
        assert_eq!(clock.status(0), TimeStatus::NotSet);
        assert_eq!(clock.now(0), None);

        clock.sync(noon_tuesday(), 1_000);
        assert_eq!(clock.status(1_000), TimeStatus::Set);
        assert_eq!(clock.status(300_999), TimeStatus::Set);
        assert_eq!(clock.status(301_000), TimeStatus::NeedsSync);

        clock.sync(noon_tuesday(), 301_000);
        assert_eq!(clock.status(301_500), TimeStatus::Set);
    }

    #[test]
    fn now_advances_from_sync_point() {
        let mut clock = SystemClock::new(300);
        clock.sync(noon_tuesday(), 5_000);
        assert_eq!(clock.now(5_999), Some(noon_tuesday()));

        let t = clock.now(5_000 + 3_723_000).unwrap();
        assert_eq!((t.hour, t.minute, t.second), (13, 2, 3));
        assert_eq!(t.day_of_week, 3);
    }

    #[test]
    fn midnight_rolls_weekday_only() {
        let mut clock = SystemClock::new(300);
        let late_saturday = DateTime {
            hour: 23,
            minute: 59,
            second: 59,
            day_of_week: 7,
            ..noon_tuesday()
        };
        clock.sync(late_saturday, 0);
        let t = clock.now(1_000).unwrap();
        assert_eq!((t.hour, t.minute, t.second), (0, 0, 0));
        assert_eq!(t.day_of_week, 1);
        assert_eq!(t.day_of_month, 14);
    }

    #[test]
    fn now_across_millis_rollover() {
        let mut clock = SystemClock::new(300);
        let synced = u32::MAX - 499;
        clock.sync(noon_tuesday(), synced);
        let t = clock.now(synced.wrapping_add(2_000)).unwrap();
        assert_eq!(t.second, 2);
    }
}
