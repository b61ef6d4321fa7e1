use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::Level;

use fks_core::{BuildConfig, Key, StaticIntSet};

/// Input: `n k_1 .. k_n q x_1 .. x_q`, whitespace separated.
/// Output: one `Yes`/`No` line per query.
#[derive(Parser)]
#[command(name = "fks", about = "FKS static set — membership queries over integers")]
struct Cli {
    /// Read from FILE instead of stdin
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Seed for hash draws (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON build config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Accept a primary hash once sum(size^2) < FACTOR * n
    #[arg(long, value_name = "FACTOR")]
    memory_factor: Option<u32>,

    /// Print build counters as JSON to stderr
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// -v info, -vv debug, -vvv trace (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<BuildConfig> {
    let mut cfg = match &cli.config {
        Some(path) => BuildConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BuildConfig::default(),
    };
    if let Some(seed) = cli.seed {
        cfg.seed = Some(seed);
    }
    if let Some(factor) = cli.memory_factor {
        cfg.memory_factor = factor;
    }
    Ok(cfg)
}

fn read_input(cli: &Cli) -> Result<String> {
    match &cli.input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Count-prefixed integer sequence.
fn read_sequence<'a, I>(tokens: &mut I, what: &str) -> Result<Vec<Key>>
where
    I: Iterator<Item = &'a str>,
{
    let count = tokens.next().ok_or_else(|| anyhow!("missing {what} count"))?;
    let count: usize = count
        .parse()
        .with_context(|| format!("bad {what} count {count:?}"))?;
    let mut out = Vec::with_capacity(count.min(1 << 20));
    for i in 0..count {
        let Some(tok) = tokens.next() else {
            bail!("{what}: expected {count} values, got {i}");
        };
        out.push(tok.parse().with_context(|| format!("bad {what} value {tok:?}"))?);
    }
    Ok(out)
}

fn parse_input(text: &str) -> Result<(Vec<Key>, Vec<Key>)> {
    let mut tokens = text.split_ascii_whitespace();
    let keys = read_sequence(&mut tokens, "key")?;
    let queries = read_sequence(&mut tokens, "query")?;
    let extra = tokens.count();
    if extra > 0 {
        tracing::warn!(extra, "ignoring trailing tokens");
    }
    Ok((keys, queries))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = load_config(&cli)?;
    let (keys, queries) = parse_input(&read_input(&cli)?)?;
    tracing::info!(keys = keys.len(), queries = queries.len(), "input read");

    let set = StaticIntSet::try_build(keys, &cfg).context("building set")?;
    if cli.stats {
        eprintln!("{}", serde_json::to_string_pretty(set.stats())?);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for q in queries {
        writeln!(out, "{}", if set.contains(q) { "Yes" } else { "No" })?;
    }
    out.flush()?;
    Ok(())
}
