//! XML renderer with color support
//!
//! Renders xot nodes back to XML text with optional ANSI color codes.
//! Element content whitespace is trimmed; the output of one node is a
//! single line.

use std::borrow::Cow;
use std::io::{self, Write};

use strum_macros::Display;
use xot::{NameId, Node, Value, Xot};

use super::colors::{Color, Painter};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// The kinds of node the renderer writes markup for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    /// A processing instruction, `<?target data?>`
    Declaration,
}

impl NodeKind {
    /// Classify a node. Document, attribute and namespace nodes have no kind.
    pub fn of(xot: &Xot, node: Node) -> Option<NodeKind> {
        match xot.value(node) {
            Value::Element(_) => Some(NodeKind::Element),
            Value::Text(_) => Some(NodeKind::Text),
            Value::Comment(_) => Some(NodeKind::Comment),
            Value::ProcessingInstruction(_) => Some(NodeKind::Declaration),
            Value::Document | Value::Attribute(_) | Value::Namespace(_) => None,
        }
    }
}

/// Options for rendering one matched node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Render the node itself; when false only its children are rendered
    pub emit_self: bool,
    /// Whether to use ANSI colors
    pub use_color: bool,
    /// Descend into child nodes
    pub emit_children: bool,
}

impl RenderConfig {
    pub fn new() -> Self {
        RenderConfig {
            emit_self: true,
            use_color: false,
            emit_children: true,
        }
    }

    pub fn with_self(mut self, emit_self: bool) -> Self {
        self.emit_self = emit_self;
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_children(mut self, emit_children: bool) -> Self {
        self.emit_children = emit_children;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Output still to be written for a node being rendered
enum Step {
    Node(Node),
    /// Closing tag, written once the element's contents are done
    Close(String),
}

/// Render a node (or only its children) to a writer.
///
/// Stops at the first failed write; whatever was written before stays
/// written. Nesting depth is bounded by memory, not by the call stack.
pub fn render<W: Write + ?Sized>(
    out: &mut W,
    xot: &Xot,
    node: Node,
    config: &RenderConfig,
) -> io::Result<()> {
    let mut painter = Painter::new(out, config.use_color);
    let mut stack = Vec::new();

    if config.emit_self {
        stack.push(Step::Node(node));
    } else if let Some(value) = leaf_value(xot, node) {
        return painter.write(&escape_text(value.trim()));
    } else {
        push_children(&mut stack, xot, node);
    }

    render_steps(&mut painter, xot, stack, config.emit_children)
}

/// Render a node to a string
pub fn render_to_string(xot: &Xot, node: Node, config: &RenderConfig) -> String {
    let mut output = Vec::new();
    render(&mut output, xot, node, config).expect("writing to a Vec cannot fail");
    String::from_utf8(output).expect("renderer writes only UTF-8")
}

/// Children go on in reverse so the first child is popped first
fn push_children(stack: &mut Vec<Step>, xot: &Xot, node: Node) {
    let start = stack.len();
    stack.extend(xot.children(node).map(Step::Node));
    stack[start..].reverse();
}

/// The text an attribute or namespace node holds
fn leaf_value<'x>(xot: &'x Xot, node: Node) -> Option<&'x str> {
    match xot.value(node) {
        Value::Attribute(attribute) => Some(attribute.value()),
        Value::Namespace(namespace) => Some(xot.namespace_str(namespace.namespace())),
        _ => None,
    }
}

fn render_steps<W: Write + ?Sized>(
    painter: &mut Painter<'_, W>,
    xot: &Xot,
    mut stack: Vec<Step>,
    recurse: bool,
) -> io::Result<()> {
    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Node(node) => node,
            Step::Close(label) => {
                close_tag(painter, &label)?;
                continue;
            }
        };

        match xot.value(node) {
            // Text and comments are leaves and are never colored
            Value::Text(text) => painter.write(&escape_text(text.get().trim()))?,
            Value::Comment(comment) => painter.write(&escape_text(comment.get().trim()))?,
            Value::ProcessingInstruction(pi) => {
                let target = xot.local_name_str(pi.target());
                let data = match pi.data() {
                    Some(data) => format!("{} {}", target, data),
                    None => target.to_string(),
                };
                open_tag(painter, xot, NodeKind::Declaration, &data, None)?;
            }
            Value::Element(element) => {
                let name = qualified_name(xot, node, element.name());
                open_tag(painter, xot, NodeKind::Element, &name, Some(node))?;
                stack.push(Step::Close(name));
                if recurse {
                    push_children(&mut stack, xot, node);
                }
            }
            Value::Document => push_children(&mut stack, xot, node),
            Value::Attribute(attribute) => {
                let scope = xot.parent(node).unwrap_or(node);
                let name = qualified_name(xot, scope, attribute.name());
                render_leaf(painter, xot, &name, attribute.value(), recurse)?;
            }
            Value::Namespace(namespace) => {
                let name = declaration_name(xot.prefix_str(namespace.prefix()));
                let uri = xot.namespace_str(namespace.namespace());
                render_leaf(painter, xot, &name, uri, recurse)?;
            }
        }
    }

    Ok(())
}

/// Writes the opening tag. `owner` is the element whose namespace
/// declarations and attributes go inside it.
fn open_tag<W: Write + ?Sized>(
    painter: &mut Painter<'_, W>,
    xot: &Xot,
    kind: NodeKind,
    label: &str,
    owner: Option<Node>,
) -> io::Result<()> {
    let (color, open, close) = match kind {
        NodeKind::Declaration => (Color::Green, "<?", "?>"),
        _ => (Color::Magenta, "<", ">"),
    };

    painter.paint(color)?;
    painter.write(open)?;
    painter.write(label)?;
    painter.reset()?;

    if let Some(element) = owner {
        for (prefix, namespace) in xot.namespaces(element).iter() {
            let name = declaration_name(xot.prefix_str(prefix));
            render_attribute(painter, " ", &name, xot.namespace_str(*namespace))?;
        }
        for (name, value) in xot.attributes(element).iter() {
            let name = qualified_name(xot, element, name);
            render_attribute(painter, " ", &name, value)?;
        }
    }
    painter.reset()?;

    painter.paint(color)?;
    painter.write(close)?;
    painter.reset()
}

fn close_tag<W: Write + ?Sized>(painter: &mut Painter<'_, W>, label: &str) -> io::Result<()> {
    painter.paint(Color::Magenta)?;
    painter.write("</")?;
    painter.write(label)?;
    painter.write(">")?;
    painter.reset_foreground()
}

/// A matched attribute or namespace node renders as an element named after
/// it, with the value as its text: `<currency>EUR</currency>`
fn render_leaf<W: Write + ?Sized>(
    painter: &mut Painter<'_, W>,
    xot: &Xot,
    name: &str,
    value: &str,
    recurse: bool,
) -> io::Result<()> {
    open_tag(painter, xot, NodeKind::Element, name, None)?;
    if recurse {
        painter.write(&escape_text(value.trim()))?;
    }
    close_tag(painter, name)
}

/// Writes `name="value"`. The closing quote is left in yellow; the next
/// attribute re-opens yellow and the caller resets after the last one.
fn render_attribute<W: Write + ?Sized>(
    painter: &mut Painter<'_, W>,
    leading: &str,
    name: &str,
    value: &str,
) -> io::Result<()> {
    painter.paint(Color::Yellow)?;
    painter.write(leading)?;
    painter.write(name)?;
    painter.write("=\"")?;
    painter.reset()?;

    painter.paint(Color::Cyan)?;
    painter.write(value)?;
    painter.reset()?;

    painter.paint(Color::Yellow)?;
    painter.write("\"")
}

/// `prefix:local` when the name's namespace is bound to a non-empty prefix
/// in scope of `scope`, otherwise the local name
fn qualified_name(xot: &Xot, scope: Node, name: NameId) -> String {
    let (local, uri) = xot.name_ns_str(name);
    if uri.is_empty() {
        return local.to_string();
    }

    let prefix = xot
        .prefix_for_namespace(scope, xot.namespace_for_name(name))
        .map(|prefix| xot.prefix_str(prefix));

    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
        Some(_) => local.to_string(),
        None if uri == XML_NAMESPACE => format!("xml:{}", local),
        None => local.to_string(),
    }
}

fn declaration_name(prefix: &str) -> String {
    if prefix.is_empty() {
        "xmlns".to_string()
    } else {
        format!("xmlns:{}", prefix)
    }
}

/// Escape character data the way Go's `xml.EscapeText` does
pub fn escape_text(text: &str) -> Cow<'_, str> {
    let needs_escape = text
        .contains(|c: char| matches!(c, '"' | '\'' | '&' | '<' | '>' | '\t' | '\n' | '\r'));
    if !needs_escape {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\t' => escaped.push_str("&#x9;"),
            '\n' => escaped.push_str("&#xA;"),
            '\r' => escaped.push_str("&#xD;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
