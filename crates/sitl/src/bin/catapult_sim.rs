//! Scripted catapult simulation runner.
//!
//! Runs the full control loop against the built-in rig: holds the arm on
//! the feedback loop, fires a launch at a configurable time, and prints
//! telemetry lines. With `--realtime` the loop is paced against the wall
//! clock; otherwise it free-runs.

use catapult_core::input::OperatorInput;
use catapult_core::parameters::{LauncherParams, ParameterStore};
use catapult_sitl::{BridgeConfig, RigConfig, SimBridge, SimError};

struct Args {
    duration_ms: u64,
    launch_at_ms: u64,
    launch_axis: f32,
    setpoint_v: f32,
    seed: u64,
    noise_v: f32,
    realtime: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            duration_ms: 2_000,
            launch_at_ms: 1_000,
            launch_axis: 2.5,
            setpoint_v: 2.0,
            seed: 42,
            noise_v: 0.0,
            realtime: false,
        }
    }
}

fn print_usage() {
    eprintln!(
        "Usage: catapult_sim [OPTIONS]\n\
         \n\
         Options:\n\
           --duration-ms N    total simulated time (default 2000)\n\
           --launch-at-ms N   fire the launch at this time (default 1000)\n\
           --launch-axis V    launch power dial reading, 0-5 V (default 2.5)\n\
           --setpoint V       position loop setpoint in volts (default 2.0)\n\
           --seed N           rig noise seed (default 42)\n\
           --noise V          sensor noise bound in volts (default 0)\n\
           --realtime         pace steps against the wall clock"
    );
}

fn parse_args() -> Option<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--duration-ms" => args.duration_ms = parse_value(&mut iter, "duration-ms")?,
            "--launch-at-ms" => args.launch_at_ms = parse_value(&mut iter, "launch-at-ms")?,
            "--launch-axis" => args.launch_axis = parse_value(&mut iter, "launch-axis")?,
            "--setpoint" => args.setpoint_v = parse_value(&mut iter, "setpoint")?,
            "--seed" => args.seed = parse_value(&mut iter, "seed")?,
            "--noise" => args.noise_v = parse_value(&mut iter, "noise")?,
            "--realtime" => args.realtime = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                return None;
            }
        }
    }
    Some(args)
}

fn parse_value<T: std::str::FromStr>(
    iter: &mut impl Iterator<Item = String>,
    name: &str,
) -> Option<T> {
    let Some(raw) = iter.next() else {
        eprintln!("Error: --{name} requires a value");
        return None;
    };
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("Error: invalid value for --{name}");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), SimError> {
    let Some(args) = parse_args() else {
        std::process::exit(2);
    };

    let mut store = ParameterStore::new();
    LauncherParams::register_defaults(&mut store)?;

    let config = BridgeConfig {
        setpoint_v: args.setpoint_v,
        feedback_enabled: true,
        rig: RigConfig {
            seed: args.seed,
            noise_v: args.noise_v,
            ..Default::default()
        },
        ..Default::default()
    };
    let step_us = config.step_size_us;
    let mut bridge = SimBridge::new(config, &store)?;

    println!("=== catapult_sim ===");
    println!(
        "task={} duration={}ms launch_at={}ms setpoint={:.2}V",
        bridge.task_name(),
        args.duration_ms,
        args.launch_at_ms,
        args.setpoint_v
    );

    let total_steps = (args.duration_ms * 1_000) / step_us;
    let launch_step = (args.launch_at_ms * 1_000) / step_us;
    let report_every = (100_000 / step_us).max(1); // one line per 100 ms

    for step in 0..total_steps {
        let input = OperatorInput {
            launch_trigger: step == launch_step,
            launch_axis_raw: args.launch_axis,
            ..Default::default()
        };
        bridge.set_input(input);

        let report = bridge.step()?;
        if step % report_every == 0 || report.launch_active {
            println!(
                "t={:6.3}s pos={:.3}V cmd={:+.2} mode={} launch={}",
                report.sim_time_us as f64 / 1e6,
                report.position_v,
                report.command,
                report.mode.name(),
                report.launch_active
            );
        }

        if args.realtime {
            tokio::time::sleep(tokio::time::Duration::from_micros(step_us)).await;
        }
    }

    let stats = bridge.stats();
    println!(
        "done: steps={} avg_exec={}us max_exec={}us deadline_misses={}",
        stats.execution_count, stats.avg_execution_us, stats.max_execution_us, stats.deadline_misses
    );
    Ok(())
}
