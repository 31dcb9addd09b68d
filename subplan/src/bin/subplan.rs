use anyhow::Context;
use clap::Parser;
use subplan::*;

/// An IPv4 address planner (VLSM / FLSM)
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to input
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    #[arg(required_unless_present = "example")]
    input:      Option<PathBuf>,

    /// Input format
    #[arg(value_enum, default_value_t = InputType::Csv)]
    format:     InputType,

    /// Plan the built-in two-router example instead of reading a file
    #[arg(short, long, default_value_t = false, conflicts_with = "input")]
    example:    bool,

    /// Subnetting mode
    #[arg(short, long, value_enum, default_value_t = Mode::Variable)]
    mode:       Mode,

    /// Base network all subnets must fit in
    #[arg(short, long, default_value = "192.168.0.0/16")]
    base:       String,

    /// Log every placement
    #[arg(short, long, default_value_t = false)]
    verbose:    bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Args::parse();

    // RUST_LOG overrides --verbose.
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_module("subplan", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let block: BoundingBlock = cli.base.parse()?;
    let demands = match cli.input {
        Some(path)  => {
            let shown = path.display().to_string();
            let read = match cli.format {
                InputType::Csv      => read_from_path::<DemandCSVParser>(path),
                InputType::Topology => read_from_path::<TopologyParser>(path),
            };
            read.with_context(|| format!("could not read demands from {shown}"))?
        },
        None        => Topology::example().demands(),
    };

    let total_start = Instant::now();
    let placed = algo::allocate(&demands, cli.mode, &block)
        .context("could not allocate subnets")?;
    let elapsed = total_start.elapsed();

    println!("{}", report::render_summary_table(&placed));
    println!("{}", report::render_detail_table(&placed));
    println!("Generated {} networks. Mode={}. Base={}", placed.len(), cli.mode, block);
    println!("Total allocation time: {} μs", elapsed.as_micros());

    Ok(())
}
