//! XPath 3.1 query engine implementation

use super::{Match, XPathError};
use xee_xpath::context::StaticContextBuilder;
use xee_xpath::{Documents, DocumentHandle, Queries, Query};
use xot::{Node, Xot};

/// URI under which the input document is registered
const DOCUMENT_URI: &str = "file:///stdin";

/// A parsed XML document ready for querying
///
/// Owns the xee-xpath document store. Nodes returned from [`Document::query`]
/// borrow nothing, but they index into this store's `Xot`, so the document
/// must outlive any rendering of its matches.
pub struct Document {
    documents: Documents,
    handle: DocumentHandle,
    bindings: NamespaceBindings,
}

/// Prefixes declared anywhere in the document, made available to queries
///
/// The first declaration of a prefix wins. The first default namespace
/// becomes the default element namespace, so unprefixed name tests match
/// elements the way they are written in the source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NamespaceBindings {
    pub prefixes: Vec<(String, String)>,
    pub default_element: Option<String>,
}

impl NamespaceBindings {
    /// Collect the namespace declarations of every element below `root`
    pub fn collect(xot: &Xot, root: Node) -> Self {
        let mut bindings = NamespaceBindings::default();
        for node in xot.descendants(root).filter(|node| xot.is_element(*node)) {
            for (prefix, namespace) in xot.namespaces(node).iter() {
                let prefix = xot.prefix_str(prefix);
                let uri = xot.namespace_str(*namespace);
                if prefix.is_empty() {
                    if bindings.default_element.is_none() && !uri.is_empty() {
                        bindings.default_element = Some(uri.to_string());
                    }
                } else if !bindings.prefixes.iter().any(|(known, _)| known == prefix) {
                    bindings.prefixes.push((prefix.to_string(), uri.to_string()));
                }
            }
        }
        bindings
    }

    fn static_context(&self) -> StaticContextBuilder<'_> {
        let mut builder = StaticContextBuilder::default();
        builder.namespaces(
            self.prefixes
                .iter()
                .map(|(prefix, uri)| (prefix.as_str(), uri.as_str())),
        );
        if let Some(uri) = &self.default_element {
            builder.default_element_namespace(uri.as_str());
        }
        builder
    }
}

impl Document {
    /// Parse an XML string into a queryable document
    pub fn parse(xml: &str) -> Result<Self, XPathError> {
        let mut documents = Documents::new();
        let handle = documents
            .add_string(
                DOCUMENT_URI.try_into().expect("document URI is a valid constant"),
                xml,
            )
            .map_err(|e| XPathError::XmlParse(e.to_string()))?;

        let bindings = match documents.document_node(handle) {
            Some(root) => NamespaceBindings::collect(documents.xot(), root),
            None => NamespaceBindings::default(),
        };

        Ok(Document { documents, handle, bindings })
    }

    /// The tree holding every node of this document
    pub fn xot(&self) -> &Xot {
        self.documents.xot()
    }

    /// The document node (parent of the root element)
    pub fn root(&self) -> Option<Node> {
        self.documents.document_node(self.handle)
    }

    /// Prefix bindings the queries are compiled with
    pub fn bindings(&self) -> &NamespaceBindings {
        &self.bindings
    }

    /// Evaluate an XPath expression with the document node as context
    ///
    /// Prefixes declared in the document can be used in the expression.
    /// Items come back in the order the engine produced them, which is
    /// document order for path expressions. Function items are skipped.
    pub fn query(&mut self, xpath: &str) -> Result<Vec<Match>, XPathError> {
        let queries = Queries::new(self.bindings.static_context());
        let query = queries
            .sequence(xpath)
            .map_err(|e| XPathError::Compile(e.to_string()))?;

        let results = query
            .execute(&mut self.documents, self.handle)
            .map_err(|e: xee_xpath::error::Error| XPathError::Execute(e.to_string()))?;

        let mut matches = Vec::new();
        for item in results.iter() {
            match item {
                xee_xpath::Item::Node(node) => matches.push(Match::Node(node)),
                xee_xpath::Item::Atomic(atomic) => {
                    matches.push(Match::Atomic(atomic.to_string().unwrap_or_default()));
                }
                xee_xpath::Item::Function(_) => {}
            }
        }

        Ok(matches)
    }
}
