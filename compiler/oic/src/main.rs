//! `oic`: build an object introspection type graph from a translation unit.

use std::path::Path;

use oic::{init_tracing, parse_graph_options, run};

fn print_usage() {
    eprintln!("Usage: oic <unit.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --root=<name>            Root type to build (repeatable, default: all)");
    eprintln!("  --chase-raw-pointers     Follow pointers below the root");
    eprintln!("  --read-enum-values       Record enumerator values");
    eprintln!("  --data-model=<model>     Integer widths: lp64, llp64");
    eprintln!("  --emit=<type>            Emit: tree, dot");
    eprintln!("  --cache=<path>           Store the finished graph");
    eprintln!("  -o <path>                Output file");
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        std::process::exit(1);
    }

    init_tracing();

    let options = parse_graph_options(&args[2..]);
    if let Err(err) = run(Path::new(&args[1]), &options) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
