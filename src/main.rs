/*
 chaseclock

 Twelve LEDs arranged as a clock face, a DS3231 real-time clock and one
 button, on an Arduino Uno.  A single dot chases around the ring; the
 button switches to showing the time.

 Target: ATmega328P, clock at 16 MHz.

 This program is free software: you can redistribute it and/or modify
 it under the terms of the GNU General Public License as published by
 the Free Software Foundation, either version 3 of the License, or
 (at your option) any later version.

 This program is distributed in the hope that it will be useful,
 but WITHOUT ANY WARRANTY; without even the implied warranty of
 MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 GNU General Public License for more details.

 You should have received a copy of the GNU General Public License
 along with this program.  If not, see <http://www.gnu.org/licenses/>.

 */

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod firmware;
#[cfg(all(target_arch = "avr", feature = "panic-serial"))]
mod panic;
#[cfg(target_arch = "avr")]
mod timer;

#[cfg(all(target_arch = "avr", not(feature = "panic-serial")))]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[arduino_hal::entry]
fn main() -> ! {
    firmware::run()
}

// The library builds and tests on the host; the firmware does not.
#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("chaseclock only runs on AVR, build with --target avr-atmega328p");
}
