//! DeviceLoop integration tests.
//!
//! Drives the full loop (service → phases → drivers → GpioPort) against
//! the call-recording mock board and checks write ordering, pauses,
//! events and the fail-stop path.

use super::mock_hw::{Call, MockDelay, MockGpio, RecordingSink, board, writes};
use skyctl::app::events::RigEvent;
use skyctl::app::ports::{ConfigError, PinMode};
use skyctl::app::service::{DeviceLoop, RunSummary};
use skyctl::config::{DeviceConfig, PinMap, PinNumbering};
use skyctl::drivers::relay::RelayState;
use skyctl::drivers::stepper::StepperPosition;
use skyctl::drivers::winch::WinchState;
use skyctl::error::{Error, GpioError};
use skyctl::fsm::{HaltReason, Phase, StateId, Step};

const PINS: PinMap = PinMap {
    winch_cw: 5,
    winch_ccw: 6,
    stepper_a: 13,
    stepper_b: 19,
    metal_sensor: 17,
    proximity_sensor: 27,
    descent_sensor: 22,
    relay: 26,
};

fn pause_index(calls: &[Call], nth: usize) -> usize {
    calls
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, Call::Pause { .. }))
        .nth(nth)
        .map(|(i, _)| i)
        .unwrap()
}

fn write_index(calls: &[Call], pin: u8, high: bool) -> usize {
    calls
        .iter()
        .position(|c| *c == Call::Write { pin, high })
        .unwrap()
}

#[test]
fn default_config_matches_wiring_table() {
    assert_eq!(PinMap::default(), PINS);
}

#[test]
fn initialisation_order_is_warnings_numbering_then_pins() {
    let b = board();
    let config = DeviceConfig::default();
    let _device = DeviceLoop::new(MockGpio::new(&b), &config).unwrap();

    let calls = b.borrow().calls.clone();
    assert_eq!(calls[0], Call::SetWarnings(config.gpio_warnings));
    assert_eq!(calls[1], Call::SetMode(PinNumbering::Bcm));

    let configured: Vec<(u8, PinMode)> = calls[2..]
        .iter()
        .filter_map(|c| match c {
            Call::Configure { pin, mode } => Some((*pin, *mode)),
            _ => None,
        })
        .collect();
    assert_eq!(
        configured,
        vec![
            (5, PinMode::Output),
            (6, PinMode::Output),
            (13, PinMode::Output),
            (19, PinMode::Output),
            (26, PinMode::Output),
            (17, PinMode::Input),
            (27, PinMode::Input),
            (22, PinMode::Input),
        ]
    );
    assert!(writes(&b).is_empty(), "attach must not drive any pin");
}

#[test]
fn invalid_config_is_rejected_before_touching_gpio() {
    let b = board();
    let mut config = DeviceConfig::default();
    config.pins.stepper_b = config.pins.stepper_a;

    let result = DeviceLoop::new(MockGpio::new(&b), &config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ValidationFailed(_)))
    ));
    assert!(b.borrow().calls.is_empty());
}

#[test]
fn proximity_before_first_iteration_only_cuts_power() {
    let b = board();
    let mut device = DeviceLoop::new(MockGpio::new(&b), &DeviceConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    device.sensors_mut().proximity.set_state(true);
    device.sensors_mut().metal.set_state(true);

    assert_eq!(device.step(&mut sink).unwrap(), Step::Halted);
    assert_eq!(writes(&b), vec![(PINS.relay, false)]);
    assert_eq!(device.state(), StateId::Terminated);
    assert_eq!(device.halt_reason(), Some(HaltReason::Proximity));
    assert_eq!(device.rig().relay.state(), RelayState::DeEnergized);
    assert_eq!(device.rig().winch.state(), WinchState::Idle);
    assert_eq!(
        sink.events,
        vec![RigEvent::Halted {
            reason: HaltReason::Proximity,
            cycles: 0
        }]
    );
}

#[test]
fn step_after_termination_is_a_no_op() {
    let b = board();
    let mut device = DeviceLoop::new(MockGpio::new(&b), &DeviceConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    device.sensors_mut().proximity.set_state(true);
    device.step(&mut sink).unwrap();

    let calls_before = b.borrow().calls.len();
    assert_eq!(device.step(&mut sink).unwrap(), Step::Halted);
    assert_eq!(device.step(&mut sink).unwrap(), Step::Halted);
    assert_eq!(b.borrow().calls.len(), calls_before);
    assert_eq!(sink.events.len(), 1);
}

#[test]
fn hoist_without_sensors_turns_winch_cw_and_pauses() {
    let b = board();
    let mut device = DeviceLoop::new(MockGpio::new(&b), &DeviceConfig::default()).unwrap();
    let mut sink = RecordingSink::new();

    assert_eq!(device.step(&mut sink).unwrap(), Step::Pause { ms: 500 });
    assert_eq!(writes(&b), vec![(PINS.winch_ccw, false), (PINS.winch_cw, true)]);
    assert_eq!(device.phase(), Phase::Lower);
    assert!(sink.events.is_empty());
}

#[test]
fn metal_drives_stepper_to_a_before_first_pause() {
    let b = board();
    let mut device = DeviceLoop::new(MockGpio::new(&b), &DeviceConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    device.sensors_mut().metal.set_state(true);

    // Proximity goes high after the first pause; the lower half still
    // runs, so the trip is seen at the start of the second hoist.
    let mut delay = MockDelay::raising(&b, PINS.proximity_sensor, 1);
    let summary = device.run(&mut delay, &mut sink).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            cycles: 1,
            reason: HaltReason::Proximity
        }
    );

    let calls = b.borrow().calls.clone();
    let first_pause = pause_index(&calls, 0);
    assert_eq!(calls[first_pause], Call::Pause { ms: 500 });
    assert!(write_index(&calls, PINS.stepper_a, true) < first_pause);
    assert!(write_index(&calls, PINS.winch_cw, true) < write_index(&calls, PINS.stepper_a, true));
    assert_eq!(device.rig().stepper.position(), Some(StepperPosition::A));
}

#[test]
fn descent_drives_stepper_to_b_and_clears_flags_before_short_pause() {
    let b = board();
    let mut device = DeviceLoop::new(MockGpio::new(&b), &DeviceConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    device.sensors_mut().metal.set_state(true);
    device.sensors_mut().descent.set_state(true);

    let mut delay = MockDelay::raising(&b, PINS.proximity_sensor, 2);
    let summary = device.run(&mut delay, &mut sink).unwrap();
    assert_eq!(summary.cycles, 1);
    assert_eq!(summary.reason, HaltReason::Proximity);

    let calls = b.borrow().calls.clone();
    let second_pause = pause_index(&calls, 1);
    assert_eq!(calls[second_pause], Call::Pause { ms: 100 });
    let to_b = write_index(&calls, PINS.stepper_b, true);
    assert!(pause_index(&calls, 0) < to_b && to_b < second_pause);

    assert_eq!(
        writes(&b),
        vec![
            // hoist
            (PINS.winch_ccw, false),
            (PINS.winch_cw, true),
            (PINS.stepper_b, false),
            (PINS.stepper_a, true),
            // lower
            (PINS.winch_cw, false),
            (PINS.winch_ccw, true),
            (PINS.stepper_a, false),
            (PINS.stepper_b, true),
            // proximity
            (PINS.relay, false),
        ]
    );

    assert!(!device.rig().sensors.metal.detected());
    assert!(!device.rig().sensors.descent.detected());
    assert_eq!(
        sink.events,
        vec![
            RigEvent::StepperMoved(StepperPosition::A),
            RigEvent::StepperMoved(StepperPosition::B),
            RigEvent::CycleCompleted(1),
            RigEvent::Halted {
                reason: HaltReason::Proximity,
                cycles: 1
            },
        ]
    );
}

#[test]
fn high_sensor_input_latches_flag() {
    let b = board();
    b.borrow_mut().inputs.insert(PINS.metal_sensor, true);
    let mut device = DeviceLoop::new(MockGpio::new(&b), &DeviceConfig::default()).unwrap();
    let mut sink = RecordingSink::new();

    device.step(&mut sink).unwrap();
    assert_eq!(sink.events, vec![RigEvent::StepperMoved(StepperPosition::A)]);

    b.borrow_mut().inputs.insert(PINS.metal_sensor, false);
    assert!(device.rig().sensors.metal.detected());
}

#[test]
fn custom_pauses_come_from_config() {
    let b = board();
    let config = DeviceConfig {
        hoist_pause_ms: 250,
        lower_pause_ms: 40,
        ..DeviceConfig::default()
    };
    let mut device = DeviceLoop::new(MockGpio::new(&b), &config).unwrap();
    let mut sink = RecordingSink::new();

    assert_eq!(device.step(&mut sink).unwrap(), Step::Pause { ms: 250 });
    assert_eq!(device.step(&mut sink).unwrap(), Step::Pause { ms: 40 });
    assert_eq!(device.cycles(), 1);
}

#[test]
fn start_emits_started_in_hoist() {
    let b = board();
    let mut device = DeviceLoop::new(MockGpio::new(&b), &DeviceConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    device.start(&mut sink);
    assert_eq!(sink.events, vec![RigEvent::Started(Phase::Hoist)]);
}

#[test]
fn write_failure_is_fatal_and_attempts_safe_shutdown() {
    let b = board();
    b.borrow_mut().broken_pin = Some(PINS.winch_cw);
    let mut device = DeviceLoop::new(MockGpio::new(&b), &DeviceConfig::default()).unwrap();
    let mut sink = RecordingSink::new();

    let err = device.step(&mut sink).unwrap_err();
    assert_eq!(err, GpioError::WriteFailed(PINS.winch_cw));
    assert_eq!(device.state(), StateId::Terminated);
    assert_eq!(device.halt_reason(), Some(HaltReason::Fault));

    // CCW went low before the failing CW write; shutdown could not stop
    // the broken CW line but still cut the relay.
    assert_eq!(writes(&b), vec![(PINS.winch_ccw, false), (PINS.relay, false)]);
    assert_eq!(device.rig().relay.state(), RelayState::DeEnergized);
    assert_eq!(
        sink.events,
        vec![RigEvent::Halted {
            reason: HaltReason::Fault,
            cycles: 0
        }]
    );

    assert_eq!(device.step(&mut sink).unwrap(), Step::Halted);
}

#[test]
fn run_propagates_gpio_fault() {
    let b = board();
    b.borrow_mut().broken_pin = Some(PINS.stepper_a);
    let mut device = DeviceLoop::new(MockGpio::new(&b), &DeviceConfig::default()).unwrap();
    let mut sink = RecordingSink::new();
    device.sensors_mut().metal.set_state(true);

    let mut delay = MockDelay::new(&b);
    let err = device.run(&mut delay, &mut sink).unwrap_err();
    assert_eq!(err, GpioError::WriteFailed(PINS.stepper_a));
    assert_eq!(b.borrow().pauses, 0);
    assert_eq!(device.rig().winch.state(), WinchState::Idle);
}
