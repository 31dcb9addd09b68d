use clap::Parser;
use subplan::*;

/// Shows which prefix length a host count resolves to
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Host counts to resolve
    #[arg(required = true, allow_negative_numbers = true)]
    hosts:      Vec<HostCount>,

    /// Let LAN segments resolve to /31
    #[arg(long, default_value_t = false, conflicts_with = "p2p")]
    allow_31:   bool,

    /// Treat every count as a point-to-point link
    #[arg(long, default_value_t = false)]
    p2p:        bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Args::parse();
    env_logger::Builder::new()
        .filter_module("subplan", log::LevelFilter::Warn)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();

    println!("{:>10}  {:>6}  {:>10}  {:>10}", "hosts", "prefix", "usable", "addresses");
    let mut failed = 0;
    for h in cli.hosts {
        let res = if cli.p2p {
            resolve(&Demand::link("p2p"), Mode::Variable, None)
        } else {
            smallest_prefix_for_hosts(h, !cli.allow_31)
        };
        match res {
            Ok(p)   => {
                // `resolve` and the table scan only ever yield prefixes in range.
                let usable = usable_hosts(p).unwrap_or_default();
                println!("{h:>10}  {:>6}  {usable:>10}  {:>10}", format!("/{p}"), block_size(p));
            },
            Err(e)  => {
                eprintln!("{h:>10}  error: {e}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} host count(s) could not be resolved");
    }

    Ok(())
}
