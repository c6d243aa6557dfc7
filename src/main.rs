use clustersim::{bench_step, ForcePassConfig, NVec2, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Headless cluster driver: steps the engine and reports diagnostics.
/// Rendering is left to whatever consumes the snapshot output
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scenario file, resolved under `scenarios/`
    #[arg(short, long = "file", default_value = "cluster.yaml")]
    file_name: String,

    /// Number of stars (overrides the scenario)
    #[arg(short, long)]
    num: Option<i64>,

    /// Seed tangential initial velocities
    #[arg(short, long)]
    initial: bool,

    /// Steps to run
    #[arg(short, long, default_value_t = 1000)]
    steps: u64,

    /// Log diagnostics every this many steps
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Random seed (overrides the scenario)
    #[arg(long)]
    seed: Option<u64>,

    /// Run the force pass on the rayon pool
    #[arg(long)]
    parallel: bool,

    /// Print the final snapshot as CSV on stdout
    #[arg(long)]
    snapshot: bool,

    /// Run the step benchmark instead of a simulation
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn apply_overrides(cfg: &mut ScenarioConfig, args: &Args) {
    if let Some(n) = args.num {
        cfg.cluster.stars = n;
        cfg.bodies.clear();
    }
    if args.initial {
        cfg.cluster.initial_velocity = true;
    }
    if let Some(seed) = args.seed {
        cfg.parameters.seed = seed;
    }
    if args.parallel {
        cfg.engine.force_pass = ForcePassConfig::Parallel;
    }
}

fn write_snapshot(scenario: &Scenario) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "x,y,radius,color")?;
    for s in scenario.cluster.snapshot() {
        writeln!(out, "{:e},{:e},{:e},{:e}", s.x, s.y, s.radius, s.color)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_step()?;
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    apply_overrides(&mut scenario_cfg, &args);

    let mut scenario = Scenario::build_scenario(scenario_cfg)?;
    let report_every = args.report_every.max(1);

    for step in 1..=args.steps {
        scenario.cluster.advance();

        if step % report_every == 0 || step == args.steps {
            let cluster = &scenario.cluster;
            let p = cluster.total_momentum();
            let com = cluster.center_of_mass().unwrap_or_else(NVec2::zeros);
            info!(
                "step {:>6}  t = {:.3e} s  KE = {:.4e} J  |p| = {:.4e}  com = ({:.3e}, {:.3e})",
                step,
                cluster.elapsed(),
                cluster.kinetic_energy(),
                p.norm(),
                com.x,
                com.y
            );
        }
    }

    if args.snapshot {
        write_snapshot(&scenario)?;
    }

    Ok(())
}
