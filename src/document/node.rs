/// A node of the rendered document tree.
///
/// Structure only; layout (indentation, line breaks, self-closing) is decided
/// by [`super::format`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Element carrying only attributes.
    Leaf {
        tag: &'static str,
        attributes: Vec<Attribute>,
    },
    /// Element whose content is a single run of text.
    Text {
        tag: &'static str,
        attributes: Vec<Attribute>,
        text: String,
    },
    /// Element holding nested elements.
    Container {
        tag: &'static str,
        attributes: Vec<Attribute>,
        children: Vec<Node>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: &'static str,
    pub value: String,
}

impl Attribute {
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

impl Node {
    pub fn leaf(tag: &'static str) -> Self {
        Node::Leaf {
            tag,
            attributes: Vec::new(),
        }
    }

    pub fn text(tag: &'static str, text: impl Into<String>) -> Self {
        Node::Text {
            tag,
            attributes: Vec::new(),
            text: text.into(),
        }
    }

    pub fn container(tag: &'static str, children: Vec<Node>) -> Self {
        Node::Container {
            tag,
            attributes: Vec::new(),
            children,
        }
    }

    /// Appends an attribute; attributes render in insertion order.
    pub fn with_attribute(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attributes_mut().push(Attribute::new(key, value));
        self
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Node::Leaf { tag, .. } | Node::Text { tag, .. } | Node::Container { tag, .. } => *tag,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Node::Leaf { attributes, .. }
            | Node::Text { attributes, .. }
            | Node::Container { attributes, .. } => attributes,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Container { children, .. } => children,
            Node::Leaf { .. } | Node::Text { .. } => &[],
        }
    }

    fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        match self {
            Node::Leaf { attributes, .. }
            | Node::Text { attributes, .. }
            | Node::Container { attributes, .. } => attributes,
        }
    }
}
