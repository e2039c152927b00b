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
//! The ring of twelve LEDs, one per hour position.

use embedded_hal::digital::OutputPin;

use crate::chase::LED_COUNT;
use crate::ds3231::DateTime;

/// Which pattern the ring is showing, selected by the button latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Chase,
    /// Hour lit steady, minute blinking.
    Face,
}

impl DisplayMode {
    #[must_use]
    pub fn from_latch(latched: bool) -> Self {
        if latched {
            DisplayMode::Face
        } else {
            DisplayMode::Chase
        }
    }
}

/// On/off state for every position.
pub type Pattern = [bool; LED_COUNT];

/// Hour position lit steady, minute position (5 minutes per step) blinking
/// at 1 Hz.
#[must_use]
pub fn clock_face(time: &DateTime, now_ms: u32) -> Pattern {
    let mut pattern = [false; LED_COUNT];
    if (now_ms / 500) % 2 == 0 {
        pattern[usize::from(time.minute / 5) % LED_COUNT] = true;
    }
    pattern[usize::from(time.hour) % LED_COUNT] = true;
    pattern
}

pub struct LedRing<P> {
    pins: [P; LED_COUNT],
}

impl<P: OutputPin> LedRing<P> {
    /// `pins[0]` is twelve o'clock, then clockwise.
    pub fn new(pins: [P; LED_COUNT]) -> Self {
        Self { pins }
    }

    pub fn show_pattern(&mut self, pattern: &Pattern) -> Result<(), P::Error> {
        for (pin, &on) in self.pins.iter_mut().zip(pattern) {
            if on {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }
        Ok(())
    }

    /// Light exactly one position.  Out of range lights nothing.
    pub fn show(&mut self, index: u8) -> Result<(), P::Error> {
        let mut pattern = [false; LED_COUNT];
        if let Some(on) = pattern.get_mut(usize::from(index)) {
            *on = true;
        }
        self.show_pattern(&pattern)
    }

    pub fn all_off(&mut self) -> Result<(), P::Error> {
        self.show_pattern(&[false; LED_COUNT])
    }

    #[cfg(test)]
    pub(crate) fn pins(&self) -> &[P; LED_COUNT] {
        &self.pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{lit, FakePin};

    fn at(hour: u8, minute: u8) -> DateTime {
        DateTime {
            hour,
            minute,
            ..DateTime::default()
        }
    }

    #[test]
    fn show_lights_one() {
        let mut ring = LedRing::new([FakePin::default(); LED_COUNT]);
        ring.show(3).unwrap();
        ring.show(7).unwrap();
        assert_eq!(lit(&ring), [7]);
    }

    #[test]
    fn show_out_of_range_clears() {
        let mut ring = LedRing::new([FakePin::default(); LED_COUNT]);
        ring.show(5).unwrap();
        ring.show(12).unwrap();
        assert!(lit(&ring).is_empty());
    }

    #[test]
    fn every_pin_is_driven() {
        let mut ring = LedRing::new([FakePin::default(); LED_COUNT]);
        ring.all_off().unwrap();
        assert!(ring.pins().iter().all(|p| p.writes == 1 && !p.high));
    }

    #[test]
    fn face_blinks_minute() {
        // 15:25 -> hour 3, minute position 5
        let on = clock_face(&at(15, 25), 0);
        let off = clock_face(&at(15, 25), 500);
        let positions = |p: Pattern| -> Vec<usize> {
            p.iter().enumerate().filter(|&(_, &v)| v).map(|(i, _)| i).collect()
        };
        assert_eq!(positions(on), [3, 5]);
        assert_eq!(positions(off), [3]);
    }

    #[test]
    fn face_midnight_and_noon_at_top() {
        assert!(clock_face(&at(0, 59), 500)[0]);
        assert!(clock_face(&at(12, 0), 500)[0]);
        // Minute 59 sits at position 11.
        assert!(clock_face(&at(0, 59), 0)[11]);
    }

    #[test]
    fn mode_from_latch() {
        assert_eq!(DisplayMode::from_latch(false), DisplayMode::Chase);
        assert_eq!(DisplayMode::from_latch(true), DisplayMode::Face);
    }
}
