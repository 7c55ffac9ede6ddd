//! Button adapters.
//!
//! Two flavors behind the same [`ButtonPort`]: a raw-GPIO button for
//! the target's panel switches, and a generic adapter over any
//! `embedded-hal` input pin for boards where the buttons hang off an
//! expander. Both are active-low with a pull-up; debouncing lives in
//! the room button scanner, not here.

use embedded_hal::digital::InputPin;

use crate::drivers::hw;
use crate::ports::ButtonPort;

/// Panel button wired straight to a GPIO.
pub struct GpioButton {
    pin: i32,
}

impl GpioButton {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ButtonPort for GpioButton {
    fn is_pressed(&mut self) -> bool {
        // Active-low: pressed pulls the line to ground.
        !hw::gpio_read(self.pin)
    }
}

/// Button behind any `embedded-hal` digital input.
pub struct InputPinButton<P: InputPin> {
    pin: P,
}

impl<P: InputPin> InputPinButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> ButtonPort for InputPinButton<P> {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}
