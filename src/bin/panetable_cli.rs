//! CLI tool for panetable - renders a table view from JSON inputs
//!
//! Usage:
//!   panetable_cli <columns.json> <data.json>                        # View JSON to stdout
//!   panetable_cli <columns.json> <data.json> -o out.json            # View JSON to file
//!   panetable_cli <columns.json> <data.json> --options opts.json    # With table options

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use panetable::render_view;

fn read_or_exit(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: panetable_cli <columns.json> <data.json> [flags]");
        eprintln!("  -o <output.json>          write the view to a file");
        eprintln!("  --options <options.json>  table options");
        std::process::exit(1);
    }

    let columns = read_or_exit(&args[1]);
    let data = read_or_exit(&args[2]);

    let mut output_path = None;
    let mut options = String::new();
    let mut rest = args[3..].iter();
    while let Some(flag) = rest.next() {
        match (flag.as_str(), rest.next()) {
            ("-o", Some(path)) => output_path = Some(path.clone()),
            ("--options", Some(path)) => options = read_or_exit(path),
            _ => {
                eprintln!("Unexpected argument: {}", flag);
                std::process::exit(1);
            }
        }
    }

    // Render
    let view = match render_view(&columns, &data, &options) {
        Ok(view) => view,
        Err(e) => {
            eprintln!("Error rendering table: {}", e);
            std::process::exit(1);
        }
    };

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&view) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
