use std::fs;
use std::path::PathBuf;

use clap::Parser;
use probe_table::ProbeTable;
use probe_table::TableConfig;

#[derive(Parser, Debug)]
struct Args {
    /// Requested number of slots; rounded up to a prime.
    #[arg(short = 'c', long = "capacity", default_value_t = 1000)]
    capacity: usize,

    /// Probe strategies to compare.
    #[arg(short = 'p', long = "probe", default_values = ["linear", "quadratic", "double"])]
    probes: Vec<String>,

    /// Primary hash strategy.
    #[arg(long = "hash", default_value = "weighted")]
    hash: String,

    /// Secondary hash strategy, used for the double hashing step.
    #[arg(long = "secondary", default_value = "sum")]
    secondary: String,

    /// Whitespace-separated words to load. Synthetic keys are used if absent.
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Dump every slot after loading.
    #[arg(long)]
    dump: bool,
}

fn load_words(args: &Args) -> Vec<Vec<u8>> {
    match &args.file {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text
                .split_whitespace()
                .map(|w| w.as_bytes().to_vec())
                .collect(),
            Err(err) => {
                eprintln!("cannot read {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => (0..args.capacity * 3 / 4)
            .map(|i| format!("key_{i:05}").into_bytes())
            .collect(),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let words = load_words(&args);

    for probe in &args.probes {
        let config = TableConfig::new(args.capacity)
            .probe(probe.as_str())
            .hash(args.hash.as_str())
            .secondary_hash(args.secondary.as_str());
        let mut table = match ProbeTable::with_config(&config) {
            Ok(table) => table,
            Err(err) => {
                eprintln!("cannot create table of {} slots: {err}", config.capacity());
                std::process::exit(1);
            }
        };

        let mut rejected = 0;
        for (i, word) in words.iter().enumerate() {
            if table.insert(word, i).is_err() {
                rejected += 1;
            }
        }

        for word in &words {
            let _ = table.get(word);
        }
        for word in words.iter().step_by(2) {
            let _ = table.remove(word);
        }

        println!("==== {probe} ====");
        let mut summary = String::new();
        if table.summary(&mut summary).is_ok() {
            print!("{summary}");
        }
        println!("Rejected inserts: {rejected}");
        table.stats().print();
        table.print_probe_histogram();

        if args.dump {
            let mut dump = String::new();
            if table.dump(&mut dump, "").is_ok() {
                print!("{dump}");
            }
        }
        println!();
    }
}
