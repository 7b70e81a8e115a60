use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use energy_cycle_simulator::{
    app, config,
    cycle::{
        compare, sample_curves, CycleConfiguration, ModelSlot, Scenario, DEFAULT_SAMPLE_STEPS,
    },
    export::{self, ChartLabels},
    i18n::{self, keys, Translator},
    power::{self, ModelParameters},
    report,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare two P(t) = k·t·e^(-at) power models over one cycle")]
struct Cli {
    /// Config file path
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH, value_hint = ValueHint::FilePath)]
    config: PathBuf,

    /// Language (auto/en/es)
    #[arg(short = 'L', long, global = true, default_value = "auto")]
    lang: String,

    /// Verbose logging
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the comparison report for the configured scenario
    Compare(ScenarioArgs),
    /// Sample both power curves over [0, T]
    Curve(CurveArgs),
    /// Peak time and power of a single model
    Peak(SingleModelArgs),
    /// Energy of a single model over [0, T]
    Energy(EnergyArgs),
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    /// Cycle time in hours
    #[arg(long)]
    cycle_time: Option<f64>,
    /// Energy cost per kWh
    #[arg(long)]
    cost_per_kwh: Option<f64>,
    /// Model A amplitude k
    #[arg(long)]
    ka: Option<f64>,
    /// Model A decay a
    #[arg(long)]
    aa: Option<f64>,
    /// Model B amplitude k
    #[arg(long)]
    kb: Option<f64>,
    /// Model B decay a
    #[arg(long)]
    ab: Option<f64>,
}

#[derive(Args, Debug)]
struct CurveArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Number of intervals (points = steps + 1)
    #[arg(long, default_value_t = DEFAULT_SAMPLE_STEPS)]
    steps: usize,

    /// Output CSV path (`-` for stdout)
    #[arg(short, long, default_value = "-", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Output SVG chart path
    #[arg(long, value_hint = ValueHint::FilePath)]
    svg: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SingleModelArgs {
    /// Amplitude constant k
    #[arg(short, long, allow_negative_numbers = true)]
    k: f64,
    /// Decay constant a
    #[arg(short, long, allow_negative_numbers = true)]
    a: f64,
}

#[derive(Args, Debug)]
struct EnergyArgs {
    #[command(flatten)]
    model: SingleModelArgs,
    /// Cycle time in hours
    #[arg(short = 't', long, allow_negative_numbers = true)]
    cycle_time: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut cfg = config::load_or_default_from(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    info!(lang = tr.language_code(), "starting");

    match cli.command {
        None => app::run(&mut cfg, &mut tr).context("interactive session failed"),
        Some(Command::Compare(args)) => handle_compare(&cfg, &tr, &args),
        Some(Command::Curve(args)) => handle_curve(&cfg, &tr, &args),
        Some(Command::Peak(args)) => {
            handle_peak(&cfg, &args);
            Ok(())
        }
        Some(Command::Energy(args)) => {
            handle_energy(&cfg, &args);
            Ok(())
        }
    }
}

/// 설정의 시나리오에 명령행 값을 덮어쓴다. 검증에 실패하면 오류.
fn apply_overrides(cfg: &config::Config, args: &ScenarioArgs) -> Result<Scenario> {
    let mut scenario = cfg.scenario.clone();
    let cycle = scenario.cycle;
    scenario.cycle = CycleConfiguration::new(
        args.cycle_time.unwrap_or(cycle.cycle_time()),
        args.cost_per_kwh.unwrap_or(cycle.cost_per_kwh()),
    )?;
    for (slot, k, a) in [
        (ModelSlot::A, args.ka, args.aa),
        (ModelSlot::B, args.kb, args.ab),
    ] {
        let current = scenario.model(slot);
        *scenario.model_mut(slot) = ModelParameters::new(
            k.unwrap_or(current.k()),
            a.unwrap_or(current.a()),
        )
        .with_context(|| format!("invalid parameters for model {slot}"))?;
    }
    Ok(scenario)
}

fn handle_compare(cfg: &config::Config, tr: &Translator, args: &ScenarioArgs) -> Result<()> {
    let scenario = apply_overrides(cfg, args)?;
    let result = compare(&scenario);
    print!(
        "{}",
        report::render_report(tr, &scenario, &result, &cfg.default_units)
    );
    Ok(())
}

fn handle_curve(cfg: &config::Config, tr: &Translator, args: &CurveArgs) -> Result<()> {
    let scenario = apply_overrides(cfg, &args.scenario)?;
    let points = sample_curves(
        scenario.cycle.cycle_time(),
        &scenario.model_a,
        &scenario.model_b,
        args.steps,
    );
    if args.output.as_os_str() == "-" {
        export::write_curve_csv(&points, io::stdout().lock())?;
    } else {
        export::write_curve_csv_file(&points, &args.output)
            .with_context(|| format!("failed to write {}", args.output.display()))?;
    }
    if let Some(svg) = &args.svg {
        let labels = ChartLabels {
            title: tr.t(keys::CURVE_TITLE).to_string(),
            x_axis: tr.t(keys::CURVE_TIME_AXIS).to_string(),
            y_axis: tr.t(keys::CURVE_POWER_AXIS).to_string(),
            series_a: tr.fmt(keys::MODEL, &[("slot", "A".into())]),
            series_b: tr.fmt(keys::MODEL, &[("slot", "B".into())]),
        };
        export::write_curve_svg_file(&points, &labels, svg)
            .with_context(|| format!("failed to write {}", svg.display()))?;
    }
    Ok(())
}

/// 검증 없이 계산 코어를 그대로 호출한다. 정의되지 않은 값은 "—".
fn handle_peak(cfg: &config::Config, args: &SingleModelArgs) {
    let peak = power::find_peak(args.k, args.a);
    println!(
        "t* = {} h, P(t*) = {}",
        report::format_value(peak.time, 4),
        report::format_power(peak.power, cfg.default_units.power)
    );
}

fn handle_energy(cfg: &config::Config, args: &EnergyArgs) {
    let energy = power::interval_energy(args.cycle_time, args.model.k, args.model.a);
    println!(
        "E[0, {}] = {}",
        report::format_value(args.cycle_time, 2),
        report::format_energy(energy, cfg.default_units.energy)
    );
}
