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
//! Binary-coded decimal conversion for the DS3231 registers.
//!
//! Only values 0-99 are meaningful.  Anything larger wraps instead of
//! panicking, the registers never hold such values anyway.

/// Convert a decimal value to packed BCD, one digit per nibble.
#[must_use]
pub const fn encode(value: u8) -> u8 {
    (value / 10).wrapping_mul(16).wrapping_add(value % 10)
}

/// Convert packed BCD back to a decimal value.
#[must_use]
pub const fn decode(bcd: u8) -> u8 {
    (bcd >> 4).wrapping_mul(10).wrapping_add(bcd & 0x0f)
}
