//! Object introspection type graph driver.
//!
//! Loads a translation unit described as a JSON [`TypeTable`], builds one
//! type graph for the requested root types, and emits it as a tree or a
//! Graphviz digraph. Optionally stores the graph as a cache entity.
//!
//! A root that fails to build is reported and skipped; the other roots are
//! still emitted.

mod error;
mod options;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Once;

use oi_frontend::TypeTable;
use oi_graph::{
    DotPrinter, GraphStats, NodeKind, RootInfo, TreePrinter, TypeGraph, TypeGraphEntity,
};
use oi_parse::TypeParser;

pub use error::DriverError;
pub use options::{parse_graph_options, EmitKind, GraphOptions};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber once, and only if `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// A built graph plus the roots that could not be built.
#[derive(Debug)]
pub struct GraphBuild {
    pub entity: TypeGraphEntity,
    /// One [`DriverError::UnknownRoot`] or [`DriverError::Parse`] per
    /// skipped root.
    pub failures: Vec<DriverError>,
}

/// Read and validate a JSON translation unit.
pub fn load_unit(path: &Path) -> Result<TypeTable, DriverError> {
    let text = fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table: TypeTable = serde_json::from_str(&text).map_err(|source| DriverError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    table.validate()?;
    tracing::debug!(path = %path.display(), types = table.len(), "loaded translation unit");
    Ok(table)
}

/// Build one graph for the requested roots of `table`.
pub fn build_graph(table: &TypeTable, options: &GraphOptions) -> GraphBuild {
    let names: Vec<String> = if options.roots.is_empty() {
        table.roots().iter().map(|root| root.name.clone()).collect()
    } else {
        options.roots.clone()
    };

    let mut graph = TypeGraph::new();
    let mut roots = Vec::with_capacity(names.len());
    let mut failures = Vec::new();
    let mut parser = TypeParser::new(table, &mut graph, options.parser);
    for name in names {
        let Some(ty) = table.lookup(&name) else {
            failures.push(DriverError::UnknownRoot(name));
            continue;
        };
        match parser.parse_root(ty) {
            Ok(node) => {
                let ty = parser.graph().display_name(node);
                tracing::debug!(root = %name, ty = %ty, "built root");
                roots.push(RootInfo { name, node });
            }
            Err(source) => failures.push(DriverError::Parse { root: name, source }),
        }
    }

    let stats = GraphStats::collect(&graph);
    tracing::debug!(
        roots = roots.len(),
        failed = failures.len(),
        nodes = stats.total(),
        classes = stats.get(NodeKind::Class),
        pointers = stats.get(NodeKind::Pointer),
        "built type graph"
    );

    GraphBuild {
        entity: TypeGraphEntity::new(roots, graph),
        failures,
    }
}

/// Render a graph in the requested format.
pub fn render(graph: &TypeGraph, emit: EmitKind) -> String {
    match emit {
        EmitKind::Tree => TreePrinter::render(graph),
        EmitKind::Dot => DotPrinter::render(graph),
    }
}

/// Store `entity` at `path`.
pub fn store_cache(path: &Path, entity: &TypeGraphEntity) -> Result<(), DriverError> {
    let file = File::create(path).map_err(|source| DriverError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    entity.store(BufWriter::new(file))?;
    tracing::debug!(path = %path.display(), "stored type graph cache");
    Ok(())
}

/// Run a full `oic` invocation on the unit at `path`.
pub fn run(path: &Path, options: &GraphOptions) -> Result<(), DriverError> {
    let table = load_unit(path)?;
    let build = build_graph(&table, options);
    for failure in &build.failures {
        eprintln!("error: {failure}");
    }

    let text = render(&build.entity.graph, options.emit);
    match &options.output {
        Some(output) => fs::write(output, text).map_err(|source| DriverError::Write {
            path: output.clone(),
            source,
        })?,
        None => print!("{text}"),
    }

    if let Some(cache) = &options.cache {
        store_cache(cache, &build.entity)?;
    }

    if build.failures.is_empty() {
        Ok(())
    } else {
        Err(DriverError::RootsFailed {
            failed: build.failures.len(),
            total: build.failures.len() + build.entity.roots.len(),
        })
    }
}
