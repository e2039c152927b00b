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
//! Fake hardware for host tests.

use core::convert::Infallible;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use crate::ds3231::RTC_ADDRESS;
use crate::ring::LedRing;

#[derive(Debug, PartialEq)]
pub struct FakeError;

impl embedded_hal::i2c::Error for FakeError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }
}

/// Register file behind a register pointer, like the real chip.
pub struct FakeRtc {
    pub registers: [u8; 0x13],
    pointer: usize,
    /// When false every transaction fails with no acknowledge.
    pub present: bool,
    pub writes: usize,
}

impl FakeRtc {
    pub fn new() -> Self {
        Self {
            registers: [0; 0x13],
            pointer: 0,
            present: true,
            writes: 0,
        }
    }
}

impl ErrorType for FakeRtc {
    type Error = FakeError;
}

impl I2c for FakeRtc {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), FakeError> {
        if !self.present || address != RTC_ADDRESS {
            return Err(FakeError);
        }
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    if let Some((&pointer, data)) = bytes.split_first() {
                        self.pointer = usize::from(pointer);
                        for &b in data {
                            self.registers[self.pointer] = b;
                            self.pointer += 1;
                            self.writes += 1;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for b in buf.iter_mut() {
                        *b = self.registers[self.pointer];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FakePin {
    pub high: bool,
    pub writes: u32,
}

impl PinErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

/// Positions currently driven high.
pub fn lit(ring: &LedRing<FakePin>) -> Vec<usize> {
    ring.pins()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.high)
        .map(|(i, _)| i)
        .collect()
}
