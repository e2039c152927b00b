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
//! LED chase clock driven by a DS3231 real-time clock.
//!
//! Everything here is hardware independent: bus and pin access goes through
//! the `embedded-hal` traits so the logic runs on the host under `cargo test`.
//! The AVR firmware lives in the binary.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod bcd;
pub mod button;
pub mod chase;
pub mod ds3231;
pub mod ring;
pub mod settings;
pub mod time;

#[cfg(test)]
mod testing;
