//! Command-line options.

use std::path::PathBuf;

use oi_parse::{DataModel, ParserOptions};

/// Output format of the finished graph.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum EmitKind {
    /// Indented tree (default).
    #[default]
    Tree,
    /// Graphviz digraph.
    Dot,
}

impl EmitKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tree" => Some(Self::Tree),
            "dot" => Some(Self::Dot),
            _ => None,
        }
    }
}

/// Options for one `oic` invocation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GraphOptions {
    pub parser: ParserOptions,
    pub emit: EmitKind,
    /// Root types to build, by exported name. Empty means every root of the
    /// translation unit.
    pub roots: Vec<String>,
    /// Where to store the finished graph entity (--cache).
    pub cache: Option<PathBuf>,
    /// Output file path (-o, --output). Stdout when unset.
    pub output: Option<PathBuf>,
}

/// Parse option arguments. Unknown values warn and keep the default.
pub fn parse_graph_options(args: &[String]) -> GraphOptions {
    let mut options = GraphOptions::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "--chase-raw-pointers" {
            options.parser.chase_raw_pointers = true;
        } else if arg == "--read-enum-values" {
            options.parser.read_enum_values = true;
        } else if let Some(model) = arg.strip_prefix("--data-model=") {
            if let Some(model) = DataModel::from_name(model) {
                options.parser.data_model = model;
            } else {
                eprintln!("warning: unknown data model '{model}', using lp64");
            }
        } else if let Some(emit) = arg.strip_prefix("--emit=") {
            if let Some(emit) = EmitKind::from_name(emit) {
                options.emit = emit;
            } else {
                eprintln!("warning: unknown emit type '{emit}', options: tree, dot");
            }
        } else if let Some(root) = arg.strip_prefix("--root=") {
            options.roots.push(root.to_string());
        } else if let Some(path) = arg.strip_prefix("--cache=") {
            options.cache = Some(PathBuf::from(path));
        } else if let Some(output) = arg.strip_prefix("-o=") {
            options.output = Some(PathBuf::from(output));
        } else if let Some(output) = arg.strip_prefix("--output=") {
            options.output = Some(PathBuf::from(output));
        } else if arg == "-o" && i + 1 < args.len() {
            options.output = Some(PathBuf::from(&args[i + 1]));
            i += 1;
        } else {
            eprintln!("warning: unknown option '{arg}'");
        }
        i += 1;
    }

    options
}
