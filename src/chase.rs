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
//! Single dot chasing around the ring.
//!
//! The dot moves one position per interval.  Each time it arrives back at
//! position 0 a sweep is counted; every `sweeps_per_reversal` sweeps the
//! direction flips and the interval grows by the increment, dropping back to
//! the floor once it would pass the ceiling.

use crate::settings::Settings;

/// Positions on the ring, 0 is twelve o'clock.
pub const LED_COUNT: usize = 12;

const LAST: u8 = LED_COUNT as u8 - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// +1, clockwise
    Forward,
    /// -1, counterclockwise
    Backward,
}

impl Direction {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Moved,
    /// Direction flipped and the interval changed on this step.
    Reversed,
}

#[derive(Debug, Clone)]
pub struct Chase {
    index: u8,
    direction: Direction,
    sweeps: u8,
    delay_ms: u16,
    last_step_ms: u32,

    floor_ms: u16,
    increment_ms: u16,
    ceiling_ms: u16,
    sweeps_per_reversal: u8,
}

impl Chase {
    /// Start at position 0 moving forward at the floor interval.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            index: 0,
            direction: Direction::Forward,
            sweeps: 0,
            delay_ms: settings.chase_floor_ms,
            last_step_ms: 0,
            floor_ms: settings.chase_floor_ms,
            increment_ms: settings.chase_increment_ms,
            ceiling_ms: settings.chase_ceiling_ms,
            sweeps_per_reversal: settings.sweeps_per_reversal,
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn delay_ms(&self) -> u16 {
        self.delay_ms
    }

    /// Sweeps completed since the last reversal.
    #[cfg(test)]
    pub(crate) fn sweeps(&self) -> u8 {
        self.sweeps
    }

    /// Advance one position regardless of time.
    pub fn step(&mut self) -> Event {
        self.index = match (self.direction, self.index) {
            (Direction::Forward, i) if i >= LAST => 0,
            (Direction::Forward, i) => i + 1,
            (Direction::Backward, 0) => LAST,
            (Direction::Backward, i) => i.min(LAST) - 1,
        };
        // A sweep is one full lap back to twelve o'clock, in either direction.
        if self.index != 0 {
            return Event::Moved;
        }

        self.sweeps = self.sweeps.saturating_add(1);
        if self.sweeps < self.sweeps_per_reversal {
            return Event::Moved;
        }
        self.sweeps = 0;
        self.direction = self.direction.reversed();
        self.delay_ms = match self.delay_ms.saturating_add(self.increment_ms) {
            d if d > self.ceiling_ms => self.floor_ms,
            d => d,
        };
        Event::Reversed
    }

    /// Step if the interval has elapsed since the last step.
    /// `now_ms` may wrap.
    pub fn poll(&mut self, now_ms: u32) -> Option<Event> {
        if now_ms.wrapping_sub(self.last_step_ms) < u32::from(self.delay_ms) {
            return None;
        }
        self.last_step_ms = now_ms;
        Some(self.step())
    }
}
