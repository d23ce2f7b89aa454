/**
 * AUV Controller Binary
 *
 * Closes the loop around a simple rigid-body plant:
 * 1. Loads a vehicle configuration (or the built-in Pico tuning)
 * 2. Ticks the controller at a fixed rate
 * 3. Feeds thruster commands back through the allocation transpose
 * 4. Logs state periodically
 *
 * Usage: auv_controller [--config vehicle.json] [--rate-hz 100] [--ticks 1000] [--dump-config]
 */

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pico_control::{Axis, ControlError, Matrix6, VehicleConfig, VehicleController, Vector6};

#[derive(Parser, Debug)]
#[command(name = "auv_controller", about = "Closed-loop 6DOF controller simulation")]
struct Args {
    /// Vehicle configuration JSON; defaults to the Pico mini-AUV
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Control loop rate in Hz
    #[arg(long, default_value_t = 100.0)]
    rate_hz: f64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u32,

    /// Target depth in meters
    #[arg(long, default_value_t = 1.0)]
    depth: f64,

    /// Target heading in degrees
    #[arg(long, default_value_t = 0.0)]
    yaw: f64,

    /// Log every N ticks
    #[arg(long, default_value_t = 50)]
    log_every: u32,

    /// Print the resolved vehicle configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

/// Unit-mass plant with linear drag, driven by Aᵀ·thrusts.
struct Plant {
    allocation_t: Matrix6,
    position: Vector6,
    velocity: Vector6,
    drag: f64,
    /// Net buoyancy pushing along heave (positive = sinks)
    bias: Vector6,
}

impl Plant {
    fn new(allocation: &Matrix6) -> Self {
        let mut bias = Vector6::zeros();
        bias[Axis::Heave.index()] = 40.0;
        Self {
            allocation_t: allocation.transpose(),
            position: Vector6::zeros(),
            velocity: Vector6::zeros(),
            drag: 4.0,
            bias,
        }
    }

    fn step(&mut self, thrusts: &Vector6, dt: f64) {
        let force = self.allocation_t * thrusts + self.bias - self.velocity * self.drag;
        self.velocity += force * dt;
        self.position += self.velocity * dt;
    }
}

fn run(args: &Args) -> Result<(), ControlError> {
    if !(args.rate_hz.is_finite() && args.rate_hz > 0.0) {
        return Err(ControlError::InvalidConfiguration(format!(
            "rate must be positive, got {}",
            args.rate_hz
        )));
    }

    let config = match &args.config {
        Some(path) => VehicleConfig::from_path(path)?,
        None => VehicleConfig::pico(),
    };

    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let mut controller = VehicleController::new(&config)?;
    let mut plant = Plant::new(controller.mixer().matrix());

    let tick = Duration::from_secs_f64(1.0 / args.rate_hz);
    let mut set_points = Vector6::zeros();
    set_points[Axis::Heave.index()] = args.depth;
    set_points[Axis::Yaw.index()] = args.yaw.to_radians();

    log::info!(
        "[AUV] '{}' at {} Hz for {} ticks, target depth {:.2} m",
        controller.name(),
        args.rate_hz,
        args.ticks,
        args.depth
    );
    log::info!(
        "[AUV] anti-windup {:?}, thrust limit {:?}, full rank {}",
        controller.engine().anti_windup(),
        controller.mixer().thrust_limit(),
        controller.mixer().is_full_rank()
    );
    for axis in Axis::ALL {
        let gains = controller.engine().loop_config(axis).gains;
        let unit = if axis.is_rotational() { "rad" } else { "m" };
        log::debug!(
            "[AUV] {} ({}): kp={} ki={} kd={}",
            axis, unit, gains.kp, gains.ki, gains.kd
        );
    }

    for n in 0..args.ticks {
        let dt = tick.as_secs_f64();
        let thrusts = controller.update(&set_points, &plant.position, dt)?;
        plant.step(&thrusts, dt);

        if args.log_every > 0 && n % args.log_every == 0 {
            let errors = controller.last_errors();
            log::info!(
                "[AUV] t={:.2}s depth={:.3} roll={:.3} pitch={:.3} | err heave={:.3} | thrusts {:?}",
                n as f64 * dt,
                plant.position[Axis::Heave.index()],
                plant.position[Axis::Roll.index()],
                plant.position[Axis::Pitch.index()],
                errors[Axis::Heave.index()],
                thrusts.iter().map(|t| (t * 10.0).round() / 10.0).collect::<Vec<_>>()
            );
        }
    }

    log::info!(
        "[AUV] final depth {:.3} m (target {:.3})",
        plant.position[Axis::Heave.index()],
        args.depth
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("[AUV] {}", e);
        std::process::exit(1);
    }
}
