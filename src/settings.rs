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
//! Tuning constants.
//!
//! Nothing is persisted; the clock boots with these every time.

/// Serial port speed for the debug log.
pub const BAUD_RATE: u32 = 57_600;

/// Uno system clock.
pub const CPU_HZ: u32 = 16_000_000;

/// TC0 prescaler and counts per `millis()` tick.  64 * 250 at 16 MHz is 1 ms.
pub const TIMER_PRESCALER: u32 = 64;
pub const TIMER_COUNTS: u32 = 250;

/// Milliseconds added to the counter on each compare match.
pub const MILLIS_INCREMENT: u32 = TIMER_PRESCALER * TIMER_COUNTS / (CPU_HZ / 1000);

/// OCR0A value for a CTC period of `counts`.  The timer counts 0 through
/// OCR0A inclusive, so the period is OCR0A + 1.
pub const fn compare_top(counts: u32) -> u8 {
    (counts - 1) as u8
}

// "Factory" default configuration can be configured here:
const CHASE_FLOOR_DEFAULT: u16 = 20;
const CHASE_INCREMENT_DEFAULT: u16 = 20;
const CHASE_CEILING_DEFAULT: u16 = 200;
const SWEEPS_PER_REVERSAL_DEFAULT: u8 = 20;

const DEBOUNCE_DEFAULT: u16 = 50;
// Half scale of the 10 bit ADC.
const BUTTON_THRESHOLD_DEFAULT: u16 = 512;

const REPORT_INTERVAL_DEFAULT: u32 = 10_000;
const SYNC_INTERVAL_DEFAULT: u32 = 300;

/// Timing and threshold settings shared by the animation, the button and
/// the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Chase step interval at boot and after a reset (range: 1-1000 ms)  Default: 20
    pub chase_floor_ms: u16,

    /// Added to the interval on every reversal (range: 1-1000 ms)  Default: 20
    pub chase_increment_ms: u16,

    /// Interval above which the chase falls back to the floor (range: floor-5000 ms)  Default: 200
    pub chase_ceiling_ms: u16,

    /// Completed sweeps between reversals (range: 1-255)  Default: 20
    pub sweeps_per_reversal: u8,

    /// Button must hold a level longer than this to count (range: 1-1000 ms)  Default: 50
    pub debounce_ms: u16,

    /// Analog reading at or above which the button is pressed (range: 1-1023)  Default: 512
    pub button_threshold: u16,

    /// Time/temperature log interval (range: 1000 ms and up)  Default: 10 s
    pub report_interval_ms: u32,

    /// Seconds between RTC re-syncs of the software clock (range: 1 and up)  Default: 300
    pub sync_interval_secs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chase_floor_ms: CHASE_FLOOR_DEFAULT,
            chase_increment_ms: CHASE_INCREMENT_DEFAULT,
            chase_ceiling_ms: CHASE_CEILING_DEFAULT,
            sweeps_per_reversal: SWEEPS_PER_REVERSAL_DEFAULT,
            debounce_ms: DEBOUNCE_DEFAULT,
            button_threshold: BUTTON_THRESHOLD_DEFAULT,
            report_interval_ms: REPORT_INTERVAL_DEFAULT,
            sync_interval_secs: SYNC_INTERVAL_DEFAULT,
        }
    }
}

impl Settings {
    /// Replace any out of range value with its default.
    #[must_use]
    pub fn validated(self) -> Self {
        let chase_floor_ms = match self.chase_floor_ms {
            v @ 1..=1000 => v,
            _ => CHASE_FLOOR_DEFAULT,
        };
        Settings {
            chase_floor_ms,
            chase_increment_ms: match self.chase_increment_ms {
                v @ 1..=1000 => v,
                _ => CHASE_INCREMENT_DEFAULT,
            },
            chase_ceiling_ms: match self.chase_ceiling_ms {
                v @ 1..=5000 if v >= chase_floor_ms => v,
                _ => CHASE_CEILING_DEFAULT.max(chase_floor_ms),
            },
            sweeps_per_reversal: match self.sweeps_per_reversal {
                0 => SWEEPS_PER_REVERSAL_DEFAULT,
                v => v,
            },
            debounce_ms: match self.debounce_ms {
                v @ 1..=1000 => v,
                _ => DEBOUNCE_DEFAULT,
            },
            button_threshold: match self.button_threshold {
                v @ 1..=1023 => v,
                _ => BUTTON_THRESHOLD_DEFAULT,
            },
            report_interval_ms: match self.report_interval_ms {
                v @ 1000.. => v,
                _ => REPORT_INTERVAL_DEFAULT,
            },
            sync_interval_secs: match self.sync_interval_secs {
                0 => SYNC_INTERVAL_DEFAULT,
                v => v,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_period_is_one_millisecond() {
        assert_eq!(compare_top(TIMER_COUNTS), 249);
        let period = (u32::from(compare_top(TIMER_COUNTS)) + 1) * TIMER_PRESCALER;
        assert_eq!(period, CPU_HZ / 1000);
        assert_eq!(MILLIS_INCREMENT, 1);
    }

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert_eq!(s.validated(), s);
    }

    #[test]
    fn bad_values_fall_back() {
        let s = Settings {
            chase_floor_ms: 0,
            chase_increment_ms: 2000,
            sweeps_per_reversal: 0,
            debounce_ms: 0,
            button_threshold: 4000,
            report_interval_ms: 10,
            sync_interval_secs: 0,
            ..Settings::default()
        }
        .validated();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn ceiling_never_below_floor() {
        let s = Settings {
            chase_floor_ms: 500,
            chase_ceiling_ms: 100,
            ..Settings::default()
        }
        .validated();
        assert_eq!(s.chase_floor_ms, 500);
        assert_eq!(s.chase_ceiling_ms, 500);
    }
}
