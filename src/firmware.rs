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
//! Board wiring for the Arduino Uno.  The loop itself is [`App`].
//!
//! | Pin       | Use                                   |
//! |-----------|---------------------------------------|
//! | D0, D1    | serial log                            |
//! | D2 - D13  | LED ring, D2 is twelve o'clock        |
//! | A0        | button (analog, pressed reads high)   |
//! | A4, A5    | I2C to the DS3231                     |

use chaseclock::app::App;
use chaseclock::ring::LedRing;
use chaseclock::settings::{Settings, BAUD_RATE};

use crate::timer::{init_tc0, millis};

const I2C_SPEED: u32 = 50_000;

pub fn run() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);
    let mut serial = arduino_hal::default_serial!(dp, pins, BAUD_RATE);

    init_tc0(dp.TC0);
    // SAFETY: the only handler is TIMER0_COMPA and it only touches its own counter.
    unsafe { avr_device::interrupt::enable() };

    let mut i2c = arduino_hal::I2c::new(
        dp.TWI,
        pins.a4.into_pull_up_input(),
        pins.a5.into_pull_up_input(),
        I2C_SPEED,
    );
    let mut adc = arduino_hal::Adc::new(dp.ADC, Default::default());
    let button_pin = pins.a0.into_analog_input(&mut adc);

    let mut ring = LedRing::new([
        pins.d2.into_output().downgrade(),
        pins.d3.into_output().downgrade(),
        pins.d4.into_output().downgrade(),
        pins.d5.into_output().downgrade(),
        pins.d6.into_output().downgrade(),
        pins.d7.into_output().downgrade(),
        pins.d8.into_output().downgrade(),
        pins.d9.into_output().downgrade(),
        pins.d10.into_output().downgrade(),
        pins.d11.into_output().downgrade(),
        pins.d12.into_output().downgrade(),
        pins.d13.into_output().downgrade(),
    ]);

    let mut app = App::new(Settings::default());
    app.start(&mut i2c, &mut ring, &mut serial, millis());

    loop {
        let raw = button_pin.analog_read(&mut adc);
        app.tick(&mut i2c, &mut ring, &mut serial, raw, millis());
    }
}
