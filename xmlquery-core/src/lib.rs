//! xmlquery-core: XPath filter over XML documents
//!
//! This library provides:
//! - XPath 3.1 query execution against a document read from a string
//! - A mode-sensitive XML serializer with optional ANSI colors
//! - Command-line option validation and color policy resolution
//! - The read → parse → query → serialize pipeline used by the CLI

pub mod xpath;
pub mod output;
pub mod options;
pub mod pipeline;

pub use xpath::{Document, Match, NamespaceBindings, XPathError};
pub use output::{render, render_to_string, resolve_color, stdout_is_terminal, NodeKind, RenderConfig};
pub use options::{CommandLineError, Flags, Invocation, Options};
pub use pipeline::{run, Error, Summary};
