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
//! One pass of the polling loop: button, scheduled RTC sync, ring, report.
//!
//! The binary owns the peripherals and calls [`App::tick`] with a fresh ADC
//! sample and `millis()`.  Nothing here blocks.

use core::convert::Infallible;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use ufmt::{uWrite, uwriteln};
use unwrap_infallible::UnwrapInfallible;

use crate::button::{Debouncer, Level};
use crate::chase::{Chase, Direction, Event};
use crate::ds3231::{self, BusError};
use crate::ring::{clock_face, DisplayMode, LedRing};
use crate::settings::Settings;
use crate::time::{SystemClock, TimeStatus};

fn mode_name(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Chase => "chase",
        DisplayMode::Face => "clock face",
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "cw",
        Direction::Backward => "ccw",
    }
}

pub struct App {
    settings: Settings,
    chase: Chase,
    button: Debouncer,
    clock: SystemClock,
    sync_interval_ms: u32,
    last_sync_ms: u32,
    last_report_ms: u32,
}

impl App {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let settings = settings.validated();
        Self {
            chase: Chase::new(&settings),
            button: Debouncer::new(&settings),
            clock: SystemClock::new(settings.sync_interval_secs),
            sync_interval_ms: settings.sync_interval_secs.saturating_mul(1000),
            last_sync_ms: 0,
            last_report_ms: 0,
            settings,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        DisplayMode::from_latch(self.button.latched())
    }

    pub fn chase(&self) -> &Chase {
        &self.chase
    }

    pub fn clock(&self) -> &SystemClock {
        &self.clock
    }

    /// Blank the ring, print the banner and do the first RTC read.
    pub fn start<I, P, W>(&mut self, i2c: &mut I, ring: &mut LedRing<P>, log: &mut W, now_ms: u32)
    where
        I: I2c,
        P: OutputPin<Error = Infallible>,
        W: uWrite<Error = Infallible>,
    {
        ring.all_off().unwrap_infallible();
        uwriteln!(log, "chaseclock {}\r", env!("CARGO_PKG_VERSION")).unwrap_infallible();
        self.sync_from_rtc(i2c, log, now_ms);
        self.last_report_ms = now_ms;
    }

    pub fn tick<I, P, W>(
        &mut self,
        i2c: &mut I,
        ring: &mut LedRing<P>,
        log: &mut W,
        button_raw: u16,
        now_ms: u32,
    ) where
        I: I2c,
        P: OutputPin<Error = Infallible>,
        W: uWrite<Error = Infallible>,
    {
        let level = Level::from_analog(button_raw, self.settings.button_threshold);
        if self.button.update(level, now_ms) {
            let mode = self.mode();
            uwriteln!(log, "mode: {}\r", mode_name(mode)).unwrap_infallible();
            if mode == DisplayMode::Chase {
                ring.show(self.chase.index()).unwrap_infallible();
            }
        }

        if now_ms.wrapping_sub(self.last_sync_ms) >= self.sync_interval_ms {
            self.sync_from_rtc(i2c, log, now_ms);
        }

        match self.mode() {
            DisplayMode::Chase => {
                if let Some(event) = self.chase.poll(now_ms) {
                    ring.show(self.chase.index()).unwrap_infallible();
                    if event == Event::Reversed {
                        uwriteln!(
                            log,
                            "reverse: {} {}ms\r",
                            direction_name(self.chase.direction()),
                            self.chase.delay_ms()
                        )
                        .unwrap_infallible();
                    }
                }
            }
            DisplayMode::Face => match self.clock.now(now_ms) {
                Some(time) => ring.show_pattern(&clock_face(&time, now_ms)).unwrap_infallible(),
                None => ring.all_off().unwrap_infallible(),
            },
        }

        if now_ms.wrapping_sub(self.last_report_ms) >= self.settings.report_interval_ms {
            self.last_report_ms = now_ms;
            self.report(i2c, log, now_ms);
        }
    }

    // A failed read leaves the clock as it was until the next scheduled sync.
    fn sync_from_rtc<I, W>(&mut self, i2c: &mut I, log: &mut W, now_ms: u32)
    where
        I: I2c,
        W: uWrite<Error = Infallible>,
    {
        self.last_sync_ms = now_ms;
        match ds3231::get_time(i2c) {
            Ok(time) => {
                self.clock.sync(time, now_ms);
                uwriteln!(log, "rtc: {}\r", time).unwrap_infallible();
            }
            Err(e) => {
                uwriteln!(log, "rtc read failed: {}\r", BusError::from_error(&e))
                    .unwrap_infallible();
            }
        }
    }

    fn report<I, W>(&self, i2c: &mut I, log: &mut W, now_ms: u32)
    where
        I: I2c,
        W: uWrite<Error = Infallible>,
    {
        match (self.clock.status(now_ms), self.clock.now(now_ms)) {
            (TimeStatus::Set, Some(time)) => uwriteln!(log, "{}\r", time),
            (_, Some(time)) => uwriteln!(log, "{} (stale)\r", time),
            (_, None) => uwriteln!(log, "time not set\r"),
        }
        .unwrap_infallible();
        match ds3231::get_temperature(i2c) {
            Ok(t) => uwriteln!(log, "temp: {}\r", t).unwrap_infallible(),
            Err(e) => {
                uwriteln!(log, "temp read failed: {}\r", BusError::from_error(&e))
                    .unwrap_infallible();
            }
        }
    }
}
