//! Actuator drivers.
//!
//! Drivers do not own the GPIO port; every command borrows it from the
//! [`Rig`](crate::fsm::context::Rig) owner for the duration of the write.

pub mod relay;
pub mod stepper;
pub mod winch;

use crate::app::ports::GpioPort;
use crate::error::GpioError;

/// Drive two complementary output pins.
///
/// The pin going LOW is always written before the pin going HIGH, so the
/// pair is never observed with both lines asserted.
pub(crate) fn write_pair(
    gpio: &mut impl GpioPort,
    (pin_a, high_a): (u8, bool),
    (pin_b, high_b): (u8, bool),
) -> Result<(), GpioError> {
    if high_a {
        gpio.write_pin(pin_b, high_b)?;
        gpio.write_pin(pin_a, high_a)
    } else {
        gpio.write_pin(pin_a, high_a)?;
        gpio.write_pin(pin_b, high_b)
    }
}
