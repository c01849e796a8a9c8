use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use tachocard_cyclic::{CyclicEf, EfKind, SlotRecord};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Decode the value bytes of a driver card cyclic elementary file.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the raw EF value (no TLV framing).
    file: PathBuf,

    /// Which elementary file the bytes belong to.
    #[arg(short, long, value_enum)]
    kind: KindArg,

    /// Print the decoded buffer as JSON.
    #[arg(long)]
    json: bool,

    /// Also list unused and undecodable slots.
    #[arg(short, long)]
    all: bool,

    /// Show raw bytes of unused and undecodable slots.
    #[arg(short = 'x', long)]
    hex: bool,

    /// Repaint the decoded records and fail unless the bytes come back unchanged.
    #[arg(long)]
    verify: bool,

    /// Log verbosity; `RUST_LOG` applies when omitted.
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Activity,
    Places,
    PlacesGen2,
    Vehicles,
    Conditions,
    GnssDriving,
}

impl From<KindArg> for EfKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Activity => Self::DriverActivity,
            KindArg::Places => Self::Places,
            KindArg::PlacesGen2 => Self::PlacesGen2,
            KindArg::Vehicles => Self::VehiclesUsed,
            KindArg::Conditions => Self::SpecificConditions,
            KindArg::GnssDriving => Self::GnssAccumulatedDriving,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_level_filter(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::OFF,
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

fn init_logging(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::default().add_directive(level.as_level_filter().into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::default().add_directive(LogLevel::default().as_level_filter().into())
        }),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let kind = EfKind::from(args.kind);
    let value = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    debug!("Read {} bytes from {}", value.len(), args.file.display());

    let ef = CyclicEf::decode(kind, &value)
        .with_context(|| format!("decoding {} from {}", kind.file_name(), args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ef)?);
    } else {
        print_buffer(&ef, args);
    }

    if args.verify {
        let painted = ef.encode().context("repainting decoded records")?;
        if let Some(offset) = first_difference(&value, &painted) {
            bail!("round trip differs at byte {offset}");
        }
        info!("Round trip reproduced all {} bytes", value.len());
        if !args.json {
            println!("Verify:           ok");
        }
    }
    Ok(())
}

fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    if a.len() != b.len() {
        return Some(a.len().min(b.len()));
    }
    a.iter().zip(b).position(|(x, y)| x != y)
}

fn print_buffer(ef: &CyclicEf, args: &Args) {
    let kind = ef.kind();
    let summary = ef.summary();

    println!("=== {} ===", kind.file_name());
    println!("Value size:       {} bytes", ef.raw().len());
    match kind.layout() {
        Some(layout) => {
            println!("Pointer size:     {} bytes", layout.pointer_size);
            println!("Slot width:       {} bytes", layout.slot_width);
            println!("Newest slot:      {}", ef.newest_pointer());
        }
        None => {
            if let CyclicEf::DriverActivity(buffer) = ef {
                println!("Oldest record:    offset {}", buffer.oldest_pointer());
            }
            println!("Newest record:    offset {}", ef.newest_pointer());
        }
    }
    println!(
        "Records:          {} ({} valid, {} invalid)",
        summary.records,
        summary.valid,
        summary.invalid()
    );

    println!();
    println!("{:>5}  Record", "#");
    println!("{}", "-".repeat(72));
    let shown = match ef {
        CyclicEf::DriverActivity(b) => print_records(&b.records, args),
        CyclicEf::Places(b) => print_records(&b.records, args),
        CyclicEf::PlacesGen2(b) => print_records(&b.records, args),
        CyclicEf::VehiclesUsed(b) => print_records(&b.records, args),
        CyclicEf::SpecificConditions(b) => print_records(&b.records, args),
        CyclicEf::GnssAccumulatedDriving(b) => print_records(&b.records, args),
    };
    println!("{}", "-".repeat(72));
    println!("Total records displayed: {shown}");
}

/// Print one table row per record, oldest first. Returns the rows printed.
fn print_records<R: Display>(records: &[SlotRecord<R>], args: &Args) -> usize {
    let mut shown = 0;
    for (index, record) in records.iter().enumerate() {
        match record {
            SlotRecord::Valid(record) => println!("{index:>5}  {record}"),
            SlotRecord::Invalid(raw) if args.all || args.hex => {
                println!("{index:>5}  {}", format_invalid(raw, args.hex));
            }
            SlotRecord::Invalid(_) => continue,
        }
        shown += 1;
    }
    shown
}

fn format_invalid(raw: &[u8], show_hex: bool) -> String {
    if show_hex {
        format!("(invalid) {}", hex::encode(raw))
    } else if raw.iter().all(|&b| b == 0x00) || raw.iter().all(|&b| b == 0xff) {
        format!("(unused, {} bytes)", raw.len())
    } else {
        format!("(undecodable, {} bytes)", raw.len())
    }
}
