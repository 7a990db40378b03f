use std::env;
use std::io;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use xrf::{load_file, Interpreter, RunConfig};

fn print_usage() {
    println!("Usage: xrf <file.xrf> [options]");
    println!();
    println!("Options:");
    println!("  --trace         Trace chunk dispatch on stderr");
    println!("  --seed <n>      Fix the shuffle seed (default: time-based)");
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut trace = false;
    let mut seed: Option<u64> = None;
    let mut files: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => trace = true,
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok());
                if seed.is_none() {
                    eprintln!("Error: --seed requires an unsigned integer");
                    process::exit(1);
                }
            }
            flag if flag.starts_with('-') => {
                eprintln!("Error: unknown option '{}'", flag);
                print_usage();
                process::exit(1);
            }
            file => files.push(file),
        }
        i += 1;
    }

    if files.len() != 1 {
        eprintln!(
            "Error: expected exactly one program file, got {}",
            files.len()
        );
        print_usage();
        process::exit(1);
    }

    let program = match load_file(files[0]) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let config = RunConfig {
        seed: seed.unwrap_or_else(time_seed),
        trace,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(program, config, stdin.lock(), stdout.lock());

    if let Err(e) = interpreter.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
