/// A basic implementation of the `millis()` function from Arduino.
///
/// https://www.arduino.cc/reference/en/language/functions/time/millis/
///
/// Uses timer TC0 and one of its interrupts to update a global millisecond
/// counter.  Based on https://blog.rahix.de/005-avr-hal-millis/
///
/// License assumed to be MIT based on https://github.com/Rahix/avr-hal/blob/main/examples/arduino-uno/src/bin/uno-millis.rs
use avr_device::interrupt::Mutex;
use chaseclock::settings::{compare_top, MILLIS_INCREMENT, TIMER_COUNTS, TIMER_PRESCALER};
use core::cell;

// Possible Values:
//
// ╔═══════════╦══════════════╦═══════════════════╗
// ║ PRESCALER ║ TIMER_COUNTS ║ Overflow Interval ║
// ╠═══════════╬══════════════╬═══════════════════╣
// ║        64 ║          250 ║              1 ms ║
// ║       256 ║          125 ║              2 ms ║
// ║       256 ║          250 ║              4 ms ║
// ║      1024 ║          125 ║              8 ms ║
// ║      1024 ║          250 ║             16 ms ║
// ╚═══════════╩══════════════╩═══════════════════╝
//
// The chase steps every 20 ms at its fastest, so take the 1 ms tick.

// Wraps after ~49 days; every consumer compares with `wrapping_sub`.
static MILLIS_COUNTER: Mutex<cell::Cell<u32>> = Mutex::new(cell::Cell::new(0));

/// Timer/Counter 0 Compare Match A interrupt service routine.
#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    avr_device::interrupt::free(|cs| {
        let counter_cell = MILLIS_COUNTER.borrow(cs);
        let counter = counter_cell.get();
        counter_cell.set(counter.wrapping_add(MILLIS_INCREMENT));
    })
}

/// Return the number of milliseconds counted since `init_tc0()` has been called.
pub fn millis() -> u32 {
    avr_device::interrupt::free(|cs| MILLIS_COUNTER.borrow(cs).get())
}

/// Initialise Timer/Counter 0 for counting milliseconds.
/// Configures the TC0 timer for the interval defined by TIMER_PRESCALER and TIMER_COUNTS (in CTC mode).
/// Interrupts still have to be enabled by the caller.
pub fn init_tc0(tc0: arduino_hal::pac::TC0) {
    // Clear Timer on Compare mode, so TIMER0_COMPA fires every TIMER_COUNTS ticks.
    tc0.tccr0a.write(|w| w.wgm0().ctc());
    tc0.ocr0a.write(|w| w.bits(compare_top(TIMER_COUNTS)));
    tc0.tccr0b.write(|w| match TIMER_PRESCALER {
        8 => w.cs0().prescale_8(),
        64 => w.cs0().prescale_64(),
        256 => w.cs0().prescale_256(),
        1024 => w.cs0().prescale_1024(),
        _ => panic!(),
    });
    tc0.timsk0.write(|w| w.ocie0a().set_bit());

    avr_device::interrupt::free(|cs| {
        MILLIS_COUNTER.borrow(cs).set(0);
    });
}
