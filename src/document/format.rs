use super::node::{Attribute, Node};

const INDENT: char = '\t';

/// Formats `root` with one tab of indentation per nesting level.
///
/// Nodes with no content self-close. Text content is escaped; attribute values
/// are written verbatim and must already be free of markup characters.
pub fn format_node(root: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Leaf { tag, attributes } => write_empty(out, tag, attributes),
        Node::Text {
            tag,
            attributes,
            text,
        } => {
            if text.is_empty() {
                write_empty(out, tag, attributes);
                return;
            }
            write_open(out, tag, attributes);
            escape_text_into(out, text);
            write_close(out, tag);
        }
        Node::Container {
            tag,
            attributes,
            children,
        } => {
            if children.is_empty() {
                write_empty(out, tag, attributes);
                return;
            }
            write_open(out, tag, attributes);
            for child in children {
                out.push('\n');
                push_indent(out, depth + 1);
                write_node(out, child, depth + 1);
            }
            out.push('\n');
            push_indent(out, depth);
            write_close(out, tag);
        }
    }
}

fn write_open(out: &mut String, tag: &str, attributes: &[Attribute]) {
    out.push('<');
    out.push_str(tag);
    write_attributes(out, attributes);
    out.push('>');
}

fn write_empty(out: &mut String, tag: &str, attributes: &[Attribute]) {
    out.push('<');
    out.push_str(tag);
    write_attributes(out, attributes);
    out.push_str("/>");
}

fn write_close(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_attributes(out: &mut String, attributes: &[Attribute]) {
    for attribute in attributes {
        out.push(' ');
        out.push_str(attribute.key);
        out.push_str("=\"");
        out.push_str(&attribute.value);
        out.push('"');
    }
}

fn push_indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat_n(INDENT, depth));
}

fn escape_text_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
