//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `sim_gpio`     | GpioPort           | Log output, in-memory levels |
//! | `hal_gpio`     | GpioPort           | `embedded-hal` pin handles   |
//! | `rpi`          | PinProvider        | `rppal` (feature `rpi`)      |
//! | `time`         | DelayNs            | Thread sleep                 |
//! | `log_sink`     | EventSink          | Log output                   |
//! | `config_file`  | ConfigPort         | JSON file                    |

pub mod config_file;
pub mod hal_gpio;
pub mod log_sink;
#[cfg(feature = "rpi")]
pub mod rpi;
pub mod sim_gpio;
pub mod time;
