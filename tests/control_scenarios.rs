use approx::assert_relative_eq;
use pico_control::{
    AntiWindup, AxesConfig, ControlError, LoopConfig, PidGains, VehicleConfig, VehicleController,
    Vector6,
};

fn axis0_only(gains: PidGains) -> VehicleController {
    let mut axes = AxesConfig::default();
    axes.surge = LoopConfig::with_gains(gains);
    let config = VehicleConfig {
        name: "scenario".to_string(),
        axes,
        anti_windup: AntiWindup::Conditional,
        ..Default::default()
    };
    VehicleController::new(&config).unwrap()
}

fn surge(value: f64) -> Vector6 {
    Vector6::new(value, 0.0, 0.0, 0.0, 0.0, 0.0)
}

#[test]
fn proportional_step_on_surge() {
    let mut ctrl = axis0_only(PidGains::proportional(1.0));
    let out = ctrl.update(&surge(1.0), &Vector6::zeros(), 1.0).unwrap();
    assert_relative_eq!(out, surge(1.0));
}

#[test]
fn integral_accumulates_over_two_ticks() {
    let mut ctrl = axis0_only(PidGains::new(0.0, 1.0, 0.0));
    let first = ctrl.update(&surge(1.0), &Vector6::zeros(), 1.0).unwrap();
    assert_relative_eq!(first, surge(1.0));

    let second = ctrl.update(&surge(1.0), &Vector6::zeros(), 1.0).unwrap();
    assert_relative_eq!(ctrl.engine().integrals()[0], 2.0);
    assert_relative_eq!(second, surge(2.0));
}

#[test]
fn zero_dt_leaves_integral_and_derivative_alone() {
    let mut ctrl = axis0_only(PidGains::new(0.0, 1.0, 10.0));
    ctrl.update(&surge(1.0), &Vector6::zeros(), 0.5).unwrap();

    let out = ctrl.update(&surge(3.0), &Vector6::zeros(), 0.0).unwrap();
    assert_relative_eq!(ctrl.engine().integrals()[0], 0.5);
    // no derivative spike even though the error jumped
    assert_relative_eq!(out, surge(0.5));
}

#[test]
fn wrong_length_leaves_state_untouched() {
    let mut ctrl = axis0_only(PidGains::new(0.0, 1.0, 0.0));
    ctrl.update(&surge(1.0), &Vector6::zeros(), 1.0).unwrap();

    for len in [5usize, 7] {
        let sp = vec![1.0; len];
        let err = ctrl.update_slices(&sp, &[0.0; 6], 1.0).unwrap_err();
        assert_eq!(err, ControlError::InvalidInputSize { which: "set-point", len });
    }

    // accumulation resumes from 1.0 as if the bad calls never happened
    let out = ctrl.update(&surge(1.0), &Vector6::zeros(), 1.0).unwrap();
    assert_relative_eq!(out, surge(2.0));
}

#[test]
fn reset_matches_fresh_controller() {
    let gains = PidGains::new(0.8, 0.3, 0.05);
    let sp = Vector6::new(0.5, -0.25, 1.0, 0.05, -0.05, 0.3);
    let pv = Vector6::new(0.1, 0.0, 0.2, 0.0, 0.01, -0.1);

    let config = VehicleConfig {
        axes: AxesConfig::uniform(gains),
        ..VehicleConfig::vectored()
    };
    let mut fresh = VehicleController::new(&config).unwrap();
    let expected = fresh.update(&sp, &pv, 0.02).unwrap();

    let mut used = VehicleController::new(&config).unwrap();
    for _ in 0..25 {
        used.update(&pv, &sp, 0.02).unwrap();
    }
    used.reset();
    assert_eq!(used.update(&sp, &pv, 0.02).unwrap(), expected);
}

#[test]
fn identity_allocation_is_transparent() {
    let config = VehicleConfig {
        axes: AxesConfig::uniform(PidGains::new(2.0, 0.5, 0.1)),
        ..Default::default()
    };
    let mut ctrl = VehicleController::new(&config).unwrap();
    let thrusts = ctrl
        .update(&Vector6::new(1.0, 2.0, 3.0, -1.0, -2.0, -3.0), &Vector6::zeros(), 0.1)
        .unwrap();
    assert_relative_eq!(thrusts, ctrl.last_efforts(), epsilon = 1e-12);
}

#[test]
fn negative_dt_is_rejected() {
    let mut ctrl = axis0_only(PidGains::proportional(1.0));
    assert_eq!(
        ctrl.update(&surge(1.0), &Vector6::zeros(), -0.5).unwrap_err(),
        ControlError::InvalidTimeDelta(-0.5)
    );
    assert_eq!(ctrl.last_errors(), Vector6::zeros());
}

#[test]
fn overflowing_tick_is_rejected_and_does_not_poison_the_loop() {
    let mut ctrl = axis0_only(PidGains::proportional(1.0));
    let err = ctrl.update(&surge(1e308), &surge(-1e308), 1.0).unwrap_err();
    assert!(matches!(err, ControlError::NumericOverflow { .. }));
    assert_eq!(ctrl.last_errors(), Vector6::zeros());

    let out = ctrl.update(&Vector6::zeros(), &Vector6::zeros(), 1.0).unwrap();
    assert_eq!(out, Vector6::zeros());
    assert_eq!(ctrl.engine().integrals(), Vector6::zeros());
}
