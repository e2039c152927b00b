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
//! Debounced push button on an analog input.
//!
//! A new level is only accepted once the raw reading has held it for longer
//! than the debounce window.  Each accepted press toggles a latch.

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Threshold a raw ADC sample.
    #[must_use]
    pub fn from_analog(raw: u16, threshold: u16) -> Self {
        if raw >= threshold {
            Level::High
        } else {
            Level::Low
        }
    }
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    stable: Level,
    last_reading: Level,
    last_change_ms: u32,
    window_ms: u16,
    latched: bool,
}

impl Debouncer {
    /// Starts stable-low with the latch off.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            stable: Level::Low,
            last_reading: Level::Low,
            last_change_ms: 0,
            window_ms: settings.debounce_ms,
            latched: false,
        }
    }

    /// Feed one sample.  Returns `true` when this sample toggled the latch.
    pub fn update(&mut self, reading: Level, now_ms: u32) -> bool {
        if reading != self.last_reading {
            self.last_reading = reading;
            self.last_change_ms = now_ms;
            return false;
        }
        if reading == self.stable
            || now_ms.wrapping_sub(self.last_change_ms) <= u32::from(self.window_ms)
        {
            return false;
        }

        self.stable = reading;
        if reading == Level::High {
            self.latched = !self.latched;
            return true;
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn stable(&self) -> Level {
        self.stable
    }

    pub fn latched(&self) -> bool {
        self.latched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> Debouncer {
        Debouncer::new(&Settings::default())
    }

    /// Feed `level` every millisecond over `from..to`, counting toggles.
    fn hold(d: &mut Debouncer, level: Level, from: u32, to: u32) -> usize {
        (from..to).filter(|&t| d.update(level, t)).count()
    }

    #[test]
    fn analog_threshold() {
        assert_eq!(Level::from_analog(0, 512), Level::Low);
        assert_eq!(Level::from_analog(511, 512), Level::Low);
        assert_eq!(Level::from_analog(512, 512), Level::High);
        assert_eq!(Level::from_analog(1023, 512), Level::High);
    }

    #[test]
    fn press_toggles_after_window() {
        let mut d = debouncer();
        assert!(!d.update(Level::High, 100));
        assert!(!d.update(Level::High, 150));
        assert_eq!(d.stable(), Level::Low);
        assert!(d.update(Level::High, 151));
        assert_eq!(d.stable(), Level::High);
        assert!(d.latched());

        // Holding it down does nothing more.
        assert_eq!(hold(&mut d, Level::High, 152, 2000), 0);
    }

    #[test]
    fn release_and_press_again_toggles_back() {
        let mut d = debouncer();
        assert_eq!(hold(&mut d, Level::High, 0, 100), 1);
        assert_eq!(hold(&mut d, Level::Low, 100, 200), 0);
        assert_eq!(d.stable(), Level::Low);
        assert!(d.latched());
        assert_eq!(hold(&mut d, Level::High, 200, 300), 1);
        assert!(!d.latched());
    }

    #[test]
    fn short_glitch_is_ignored() {
        let mut d = debouncer();
        assert_eq!(hold(&mut d, Level::High, 0, 40), 0);
        assert_eq!(hold(&mut d, Level::Low, 40, 200), 0);
        assert!(!d.latched());
    }

    #[test]
    fn chatter_toggles_at_most_once_per_window() {
        let mut d = debouncer();
        let mut toggles = 0;
        let mut toggle_times = Vec::new();
        for t in 0..5_000u32 {
            // Bounces every 3 ms for the first 30 ms of each 500 ms press cycle.
            let phase = t % 500;
            let level = if phase < 30 {
                if (t / 3) % 2 == 0 {
                    Level::High
                } else {
                    Level::Low
                }
            } else if phase < 250 {
                Level::High
            } else {
                Level::Low
            };
            if d.update(level, t) {
                toggles += 1;
                toggle_times.push(t);
            }
        }
        assert_eq!(toggles, 10);
        for pair in toggle_times.windows(2) {
            assert!(pair[1] - pair[0] > 50);
        }
    }

    #[test]
    fn window_survives_millis_rollover() {
        let mut d = debouncer();
        let start = u32::MAX - 20;
        d.update(Level::High, start);
        assert!(!d.update(Level::High, start.wrapping_add(50)));
        assert!(d.update(Level::High, start.wrapping_add(51)));
    }
}
