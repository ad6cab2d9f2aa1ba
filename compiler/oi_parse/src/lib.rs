//! Type graph construction.
//!
//! [`TypeParser`] walks a [`Frontend`](oi_frontend::Frontend)'s model of a
//! C++ type and appends the corresponding nodes to a
//! [`TypeGraph`](oi_graph::TypeGraph), creating each node once per distinct
//! type handle.
//!
//! # Termination
//!
//! Records are registered in the memo table before their members are
//! visited, so a record that refers back to itself finds its own node
//! instead of recursing forever. Pointers below the outermost level are
//! only followed when [`ParserOptions::chase_raw_pointers`] is set.
//!
//! # Failure
//!
//! A [`ParseError`] aborts the whole parse of that root. Nodes allocated by
//! the failed call are rolled back; the graph is left as it was before.

mod chase;
mod error;
mod options;
mod parser;
mod primitive;
mod stack;

pub use chase::should_chase;
pub use error::ParseError;
pub use options::{DataModel, ParserOptions};
pub use parser::TypeParser;
pub use primitive::map_builtin;
