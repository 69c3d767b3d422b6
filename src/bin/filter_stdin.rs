//! Simple CLI that reads HTML from stdin, filters it and writes the resulting
//! parse record as JSON to stdout.
//!
//! Usage: `filter_stdin <base-url> [options.json]`
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=html_node_filter=trace`).

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use html_node_filter::{dom, Directives, IndexFilter, NodeFilter, Options, ParseRecord};

fn load_options(path: Option<&str>) -> Result<Options, String> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("cannot parse {path}: {e}"))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(base_url) = args.first() else {
        eprintln!("usage: filter_stdin <base-url> [options.json]");
        process::exit(2);
    };

    let options = match load_options(args.get(1).map(String::as_str)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        process::exit(1);
    }

    let root = dom::parse(&html);
    let node_filter = NodeFilter::new(&options);
    let index_filter = IndexFilter::new(&options);

    // Without a select/exclude configuration the record keeps the
    // unfiltered parse output.
    let mut record = ParseRecord::new(base_url.as_str(), base_url.as_str());
    record.text = html_node_filter::text::extract_text(Some(&root));

    let record = node_filter.filter(record, &root, Directives::default());
    let record = index_filter.apply(record, &root);

    match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("cannot serialize record: {e}");
            process::exit(1);
        }
    }
}
