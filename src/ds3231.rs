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
//! DS3231 RTC interface
//!
//! Register layout used here (all BCD):
//!
//! | Pointer | Bytes | Contents                                         |
//! |---------|-------|--------------------------------------------------|
//! | `0x00`  | 7     | seconds, minutes, hours, weekday, date, month, year |
//! | `0x11`  | 2     | temperature MSB (whole degrees), LSB (quarters)  |

use embedded_hal::i2c::{ErrorKind, I2c, NoAcknowledgeSource};
use ufmt::{uDisplay, uWrite, uwrite, Formatter};

use crate::bcd;

// 7-bit DS3231 device address (0xd0 for write, 0xd1 for read on the wire)
pub const RTC_ADDRESS: u8 = 0x68;

const TIME_REGISTER: u8 = 0x00;
const TEMPERATURE_REGISTER: u8 = 0x11;

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Calendar time as held in the seven DS3231 time registers, decoded to
/// plain decimal.  Ranges are not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTime {
    pub second: u8,
    pub minute: u8,
    /// 0-23, the clock is assumed to run in 24 hour mode.
    pub hour: u8,
    /// 1 = Sunday ... 7 = Saturday
    pub day_of_week: u8,
    pub day_of_month: u8,
    pub month: u8,
    /// Years since 2000.
    pub year: u8,
}

impl DateTime {
    /// Decode the registers starting at `0x00`.
    #[must_use]
    pub fn from_registers(regs: &[u8; 7]) -> Self {
        Self {
            second: bcd::decode(regs[0] & 0x7f),
            minute: bcd::decode(regs[1]),
            hour: bcd::decode(regs[2] & 0x3f),
            day_of_week: bcd::decode(regs[3]),
            day_of_month: bcd::decode(regs[4]),
            month: bcd::decode(regs[5]),
            year: bcd::decode(regs[6]),
        }
    }

    /// Encode into register order starting at `0x00`.
    #[must_use]
    pub fn to_registers(&self) -> [u8; 7] {
        [
            bcd::encode(self.second),
            bcd::encode(self.minute),
            bcd::encode(self.hour),
            bcd::encode(self.day_of_week),
            bcd::encode(self.day_of_month),
            bcd::encode(self.month),
            bcd::encode(self.year),
        ]
    }

    fn weekday_name(&self) -> &'static str {
        match self.day_of_week {
            d @ 1..=7 => WEEKDAY_NAMES[usize::from(d - 1)],
            _ => "???",
        }
    }
}

fn two_digits<W>(f: &mut Formatter<'_, W>, v: u8) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    if v < 10 {
        f.write_str("0")?;
    }
    uwrite!(f, "{}", v)
}

impl uDisplay for DateTime {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        two_digits(f, self.hour)?;
        f.write_str(":")?;
        two_digits(f, self.minute)?;
        f.write_str(":")?;
        two_digits(f, self.second)?;
        uwrite!(f, " {} ", self.weekday_name())?;
        two_digits(f, self.day_of_month)?;
        f.write_str("/")?;
        two_digits(f, self.month)?;
        f.write_str("/20")?;
        two_digits(f, self.year)
    }
}

/// Die temperature, a signed whole part plus quarter degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temperature {
    whole: i8,
    quarters: u8,
}

impl Temperature {
    /// The MSB is two's complement whole degrees, the top two bits of the
    /// LSB are the fraction in 0.25 degree steps.
    #[must_use]
    pub fn from_registers(msb: u8, lsb: u8) -> Self {
        Self {
            whole: msb as i8,
            quarters: lsb >> 6,
        }
    }

    /// Temperature in units of 0.25 degrees C.
    #[must_use]
    pub fn quarter_degrees(&self) -> i16 {
        i16::from(self.whole) * 4 + i16::from(self.quarters)
    }

    /// Whole degrees, truncated toward zero.
    #[must_use]
    pub fn whole_degrees(&self) -> i8 {
        // -128.0 ..= 127.75 always fits after truncation.
        (self.quarter_degrees() / 4) as i8
    }
}

impl uDisplay for Temperature {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let q = self.quarter_degrees();
        if q < 0 {
            f.write_str("-")?;
        }
        let q = q.unsigned_abs();
        uwrite!(f, "{}.", q / 4)?;
        f.write_str(match q % 4 {
            0 => "00",
            1 => "25",
            2 => "50",
            _ => "75",
        })?;
        f.write_str("C")
    }
}

/// Printable form of a bus error for the serial log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError(pub ErrorKind);

impl BusError {
    pub fn from_error<E: embedded_hal::i2c::Error>(e: &E) -> Self {
        Self(e.kind())
    }
}

impl uDisplay for BusError {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(match self.0 {
            ErrorKind::Bus => "bus error",
            ErrorKind::ArbitrationLoss => "arbitration lost",
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => "no ack (address)",
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => "no ack (data)",
            ErrorKind::NoAcknowledge(_) => "no ack",
            ErrorKind::Overrun => "overrun",
            _ => "other",
        })
    }
}

/// Set the time on the DS3231.
pub fn set_time<I: I2c>(i2c: &mut I, time: &DateTime) -> Result<(), I::Error> {
    let regs = time.to_registers();
    let mut buf = [0u8; 8];
    buf[0] = TIME_REGISTER;
    buf[1..].copy_from_slice(&regs);
    i2c.write(RTC_ADDRESS, &buf)
}

/// Get the time from the DS3231.
pub fn get_time<I: I2c>(i2c: &mut I) -> Result<DateTime, I::Error> {
    let mut buf = [0u8; 7];
    i2c.write_read(RTC_ADDRESS, &[TIME_REGISTER], &mut buf)?;
    Ok(DateTime::from_registers(&buf))
}

/// Read the die temperature.  The chip refreshes it every 64 seconds.
pub fn get_temperature<I: I2c>(i2c: &mut I) -> Result<Temperature, I::Error> {
    let mut buf = [0u8; 2];
    i2c.write_read(RTC_ADDRESS, &[TEMPERATURE_REGISTER], &mut buf)?;
    Ok(Temperature::from_registers(buf[0], buf[1]))
}
