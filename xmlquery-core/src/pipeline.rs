//! Read → parse → query → serialize
//!
//! Runs one query over one document and writes every match on its own line.

use std::io::{self, Read, Write};
use std::time::Instant;

use thiserror::Error;

use crate::options::Options;
use crate::output::{render, NodeKind};
use crate::xpath::{Document, Match, XPathError};

/// A failed pipeline stage
#[derive(Error, Debug)]
pub enum Error {
    #[error("read input: {0}")]
    Read(#[source] io::Error),
    #[error("parse XML: {0}")]
    Parse(#[source] XPathError),
    #[error("execute query: {0}")]
    Query(#[source] XPathError),
    #[error("write XML: {0}")]
    Write(#[from] io::Error),
}

/// Outcome of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of items written
    pub matches: usize,
}

/// Query the XML read from `input` and write each match to `out`,
/// followed by a newline.
pub fn run<R: Read, W: Write + ?Sized>(
    mut input: R,
    out: &mut W,
    options: &Options,
    use_color: bool,
) -> Result<Summary, Error> {
    let verbose = options.verbose;

    let t0 = Instant::now();
    let mut xml = String::new();
    input.read_to_string(&mut xml).map_err(Error::Read)?;

    let mut document = Document::parse(&xml).map_err(Error::Parse)?;
    let t1 = Instant::now();
    if verbose {
        eprintln!(
            "xmlquery: parsed {} bytes in {:.2}ms",
            xml.len(),
            (t1 - t0).as_secs_f64() * 1000.0
        );
    }

    let matches = document.query(&options.expression).map_err(Error::Query)?;
    let t2 = Instant::now();
    if verbose {
        eprintln!(
            "xmlquery: {} matched {} item(s) in {:.2}ms",
            options.expression,
            matches.len(),
            (t2 - t1).as_secs_f64() * 1000.0
        );
    }

    let config = options.render_config(use_color);
    let xot = document.xot();

    for (index, m) in matches.iter().enumerate() {
        match m {
            Match::Node(node) => {
                if verbose {
                    let kind = NodeKind::of(xot, *node)
                        .map(|kind| kind.to_string())
                        .unwrap_or_else(|| "other".to_string());
                    eprintln!("xmlquery: match {}: {}", index + 1, kind);
                }
                render(&mut *out, xot, *node, &config)?;
            }
            Match::Atomic(value) => {
                if verbose {
                    eprintln!("xmlquery: match {}: atomic", index + 1);
                }
                out.write_all(value.as_bytes())?;
            }
        }
        out.write_all(b"\n")?;
    }
    out.flush()?;

    Ok(Summary { matches: matches.len() })
}
