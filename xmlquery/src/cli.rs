//! CLI argument parsing using clap

use std::ffi::OsString;

use clap::Parser;
use xmlquery_core::Flags;

/// Select nodes from an XML document using an XPath expression
#[derive(Parser, Debug)]
#[command(name = "xmlquery")]
#[command(version, about, long_about = None, disable_help_flag = true)]
#[command(after_help = r#"EXAMPLES:
    # Print every item element
    xmlquery -expr "//item" < document.xml

    # Print only what is inside the root element
    xmlquery -expr "/root" -contents-only < document.xml

    # Print matched elements without their subtrees, without colors
    xmlquery -expr "//section" -no-children -no-color < document.xml
"#)]
pub struct Args {
    /// XPath expression to select nodes from the input
    #[arg(long = "expr", value_name = "EXPRESSION", allow_hyphen_values = true)]
    pub expr: Option<String>,

    /// Print only the contents of selected nodes
    #[arg(long = "contents-only")]
    pub contents_only: bool,

    /// Use colored output
    #[arg(long = "color")]
    pub color: bool,

    /// Don't use colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Don't output child nodes of selected nodes
    #[arg(long = "no-children")]
    pub no_children: bool,

    /// Print this help
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Report parse and query progress on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    pub fn into_flags(self) -> Flags {
        Flags {
            expression: self.expr.unwrap_or_default(),
            contents_only: self.contents_only,
            color: self.color,
            no_color: self.no_color,
            no_children: self.no_children,
            print_help: self.help,
            verbose: self.verbose,
        }
    }
}

/// Accept Go-style single-dash long flags (`-expr //a`, `-expr=//a`) by
/// rewriting them to their double-dash form. The program name, anything
/// after `--`, and the value following `-expr` are passed through as-is.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut takes_value = false;
    let mut passthrough = false;

    for arg in args {
        if passthrough || takes_value {
            takes_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let flag = if text.starts_with('-') && !text.starts_with("--") && text.len() > 2 {
            format!("-{}", text)
        } else {
            text.to_string()
        };

        takes_value = flag == "--expr";
        normalized.push(OsString::from(flag));
    }

    normalized
}
