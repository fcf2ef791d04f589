//! Shared-preferences XML documents.
//!
//! Rendering is split in two: [`build_tree`] maps realized preferences onto a
//! [`Node`] tree and [`format_node`] lays that tree out as text. Both are pure,
//! so identical inputs always produce byte-identical documents.

mod format;
mod node;

pub use format::format_node;
pub use node::{Attribute, Node};

use crate::preference::PreferenceSpec;
use crate::sampler::{RealizedValue, Sampled};

pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8' standalone='yes' ?>";
pub const ROOT_TAG: &str = "map";
pub const MEMBER_TAG: &str = "string";

/// Builds the `map` tree, one child per sampled preference in input order.
pub fn build_tree(sampled: &[Sampled<'_>]) -> Node {
    let children = sampled
        .iter()
        .map(|(spec, value)| preference_node(spec, value))
        .collect();
    Node::container(ROOT_TAG, children)
}

/// Renders a complete document: XML declaration line followed by the tree.
pub fn render(sampled: &[Sampled<'_>]) -> String {
    let body = format_node(&build_tree(sampled));
    let mut document = String::with_capacity(XML_DECLARATION.len() + 1 + body.len());
    document.push_str(XML_DECLARATION);
    document.push('\n');
    document.push_str(&body);
    document
}

fn preference_node(spec: &PreferenceSpec, value: &RealizedValue) -> Node {
    let kind = spec.kind();
    let tag = kind.tag();
    match value {
        RealizedValue::Members(members) => Node::container(
            tag,
            members
                .iter()
                .map(|member| Node::text(MEMBER_TAG, member.to_string()))
                .collect(),
        )
        .with_attribute("name", spec.name()),
        RealizedValue::Scalar(literal) if kind.uses_value_attribute() => Node::leaf(tag)
            .with_attribute("name", spec.name())
            .with_attribute("value", literal.to_string()),
        // A lone member for a set-typed spec still renders as a one-element set.
        RealizedValue::Scalar(literal) if kind.is_multi() => {
            Node::container(tag, vec![Node::text(MEMBER_TAG, literal.to_string())])
                .with_attribute("name", spec.name())
        }
        RealizedValue::Scalar(literal) => {
            Node::text(tag, literal.to_string()).with_attribute("name", spec.name())
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
