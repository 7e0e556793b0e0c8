//! Output of query results
//!
//! - colors: ANSI palette, the color-tracking `Painter`, color policy
//! - xml_renderer: XML serializer for matched nodes

mod colors;
pub mod xml_renderer;

pub use colors::{ansi, resolve_color, stdout_is_terminal, Color, Painter};
pub use xml_renderer::{escape_text, render, render_to_string, NodeKind, RenderConfig};
