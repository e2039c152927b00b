// Based on https://github.com/Rahix/avr-hal/blob/main/examples/arduino-uno/src/bin/uno-panic.rs
// License MIT

use arduino_hal::prelude::*;
use chaseclock::settings::BAUD_RATE;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    // disable interrupts - no longer necessary after panic
    avr_device::interrupt::disable();

    // re-get the peripherals so we can access serial
    // SAFETY: we're never returning so stealing the peripherals is ok
    let dp = unsafe { arduino_hal::Peripherals::steal() };
    let pins = arduino_hal::pins!(dp);
    let mut serial = arduino_hal::default_serial!(dp, pins, BAUD_RATE);

    // Quarter positions lit together; the chase never lights more than one.
    for mut led in [
        pins.d2.into_output().downgrade(),
        pins.d5.into_output().downgrade(),
        pins.d8.into_output().downgrade(),
        pins.d11.into_output().downgrade(),
    ] {
        led.set_high();
    }

    ufmt::uwriteln!(&mut serial, "panic\r").unwrap_infallible();
    if let Some(loc) = info.location() {
        ufmt::uwriteln!(
            &mut serial,
            " at {}:{}:{}\r",
            loc.file(),
            loc.line(),
            loc.column(),
        )
        .unwrap_infallible();
    }
    loop {
        avr_device::asm::sleep();
    }
}
