//! XPath 3.1 query engine using xee-xpath
//!
//! This module loads the input document and runs the user's expression
//! against it. The serializer only ever sees the resulting node handles.

mod engine;
mod match_result;

pub use engine::{Document, NamespaceBindings};
pub use match_result::Match;

use thiserror::Error;

/// Errors that can occur during XPath evaluation
#[derive(Error, Debug)]
pub enum XPathError {
    #[error("invalid expression: {0}")]
    Compile(String),
    #[error("evaluation failed: {0}")]
    Execute(String),
    #[error("{0}")]
    XmlParse(String),
}
