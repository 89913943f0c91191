//! Fuzz target: device config parsing + validation
//!
//! Arbitrary bytes are parsed as a `DeviceConfig`.  Parsing may fail, but
//! any config that passes validation must have distinct pins and non-zero
//! pauses.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use skyctl::config::{DeviceConfig, validate_config};

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<DeviceConfig>(data) else {
        return;
    };
    if validate_config(&config).is_ok() {
        let mut pins = config.pins.all();
        pins.sort_unstable();
        assert!(
            pins.windows(2).all(|w| w[0] != w[1]),
            "validated config has duplicate pins"
        );
        assert!(config.hoist_pause_ms > 0 && config.lower_pause_ms > 0);
    }
});
