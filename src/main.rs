use anyhow::Result;
use cbuf::{config, logging, stage};
use clap::Parser;
use std::io;

#[derive(Parser, Debug)]
#[command(name = "cbuf", about = "Stage stdin through a fixed-capacity ring buffer", version = "0.1")]
struct Cli {
    /// Buffer capacity in lines (overrides [buffer] capacity)
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Lines moved per fill/drain block (overrides [buffer] block_size)
    #[arg(short, long)]
    block: Option<usize>,

    /// Print only the last N lines of stdin
    #[arg(long, value_name = "N")]
    tail: Option<usize>,

    /// After piping, print a JSON report of buffer usage to stderr
    #[arg(long)]
    json: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// tracing filter directive (overrides [log] level)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::Config::load()?;

    logging::init(cli.log_level.as_deref().unwrap_or(&cfg.log.level));

    if cli.config {
        return run_print_config(&cfg);
    }
    if let Some(n) = cli.tail {
        return run_tail(n);
    }

    let capacity = cli.capacity.unwrap_or(cfg.buffer.capacity);
    let block    = cli.block.unwrap_or(cfg.buffer.block_size);
    run_pipe(capacity, block, cli.json)
}

fn run_pipe(capacity: usize, block: usize, json: bool) -> Result<()> {
    use serde_json::json;

    let stdin  = io::stdin().lock();
    let stdout = io::BufWriter::new(io::stdout().lock());
    let report = stage::pipe(stdin, stdout, capacity, block)?;

    if json {
        let out = json!({
            "cbuf_version": env!("CARGO_PKG_VERSION"),
            "timestamp":    chrono::Local::now().to_rfc3339(),
            "capacity":     capacity,
            "block_size":   block,
            "report":       report,
        });
        eprintln!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

fn run_tail(n: usize) -> Result<()> {
    use std::io::Write;

    let lines = stage::tail(io::stdin().lock(), n)?;
    let mut stdout = io::BufWriter::new(io::stdout().lock());
    for line in &lines {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;
    Ok(())
}

fn run_print_config(cfg: &config::Config) -> Result<()> {
    let path = config::Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[buffer]");
    println!("  capacity   = {}", cfg.buffer.capacity);
    println!("  block_size = {}", cfg.buffer.block_size);
    println!();
    println!("[log]");
    println!("  level = {:?}", cfg.log.level);
    Ok(())
}
