use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use room_selector::{select, Layout, Room, RoomCount, SelectionPass};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "select-rooms")]
#[command(about = "Pick a block of hotel rooms the way the booking server does", long_about = None)]
struct Args {
    /// Number of rooms to pick (1-5); overrides the count in the input file
    #[arg(short, long)]
    count: Option<i64>,

    /// Occupied room numbers on the standard layout (comma separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "input")]
    occupied: Vec<u16>,

    /// Input JSON path ("-" for stdin) with `count` and `available`
    #[arg(short, long)]
    input: Option<String>,

    /// Verbose output level
    #[arg(short, long, default_value_t = 0)]
    verbose: u8,
}

#[derive(Debug, Deserialize)]
struct InputRequest {
    count: Option<i64>,
    available: Vec<Room>,
}

#[derive(Debug, Serialize)]
struct Output {
    rooms: Vec<Room>,
    pass: SelectionPass,
}

fn parse_input(input_json: &str) -> Result<InputRequest> {
    serde_json::from_str(input_json).context("failed to parse input JSON")
}

fn read_input(path: &str) -> Result<InputRequest> {
    let mut input_json = String::new();
    if path == "-" {
        io::stdin().read_to_string(&mut input_json)?;
    } else {
        input_json = fs::read_to_string(path)
            .with_context(|| format!("failed to read input file: {}", path))?;
    }
    parse_input(&input_json)
}

/// Count and free rooms from the input document, or from `--occupied`
/// against the standard layout when no input is given.
fn resolve(args: &Args, input: Option<InputRequest>) -> Result<(RoomCount, Vec<Room>)> {
    let (count, available) = match input {
        Some(request) => (args.count.or(request.count), request.available),
        None => {
            let available = Layout::standard()
                .rooms()
                .filter(|room| !args.occupied.contains(&room.number()))
                .collect();
            (args.count, available)
        }
    };

    let count = count.context("room count missing: pass --count or set `count` in the input")?;
    Ok((RoomCount::new(count)?, available))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = args.input.as_deref().map(read_input).transpose()?;
    let (count, available) = resolve(&args, input)?;

    if args.verbose > 0 {
        eprintln!(
            "select-rooms: choosing {} of {} free rooms",
            count.get(),
            available.len()
        );
    }

    let selection = select(count, &available)?;
    let output = Output {
        rooms: selection.rooms,
        pass: selection.pass,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
