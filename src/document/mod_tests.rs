use super::*;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::preference::{Literal, PreferenceDecl, PreferenceSpec};
use crate::sampler::ValueSampler;

fn spec(name: &str, kind: &str, values: Option<Vec<Literal>>) -> PreferenceSpec {
    PreferenceSpec::from_decl(&PreferenceDecl {
        name: Some(name.to_string()),
        kind: Some(kind.to_string()),
        values,
        ..PreferenceDecl::default()
    })
    .expect("valid spec")
}

fn paired(specs: &[PreferenceSpec], values: Vec<RealizedValue>) -> Vec<Sampled<'_>> {
    assert_eq!(specs.len(), values.len(), "one value per spec");
    specs.iter().zip(values).collect()
}

fn scalar(value: impl Into<Literal>) -> RealizedValue {
    RealizedValue::Scalar(value.into())
}

#[test]
fn renders_every_type() {
    let specs = vec![
        spec("x", "string", Some(vec!["a".into(), "b".into()])),
        spec("n", "int", Some(vec![Literal::Integer(3)])),
        spec("y", "boolean", None),
        spec("f", "float", Some(vec![Literal::Float(1.0), Literal::Float(0.25)])),
        spec("z", "set", Some(vec!["a".into(), "b".into(), "c".into()])),
    ];
    let values = vec![
        scalar("b"),
        scalar(3i64),
        scalar(false),
        scalar(1.0),
        RealizedValue::Members(vec!["c".into(), "a".into(), "c".into()]),
    ];

    let expected = "<?xml version='1.0' encoding='utf-8' standalone='yes' ?>\n\
                    <map>\n\
                    \t<string name=\"x\">b</string>\n\
                    \t<int name=\"n\" value=\"3\"/>\n\
                    \t<boolean name=\"y\" value=\"false\"/>\n\
                    \t<float name=\"f\" value=\"1.0\"/>\n\
                    \t<set name=\"z\">\n\
                    \t\t<string>c</string>\n\
                    \t\t<string>a</string>\n\
                    \t\t<string>c</string>\n\
                    \t</set>\n\
                    </map>";
    assert_eq!(render(&paired(&specs, values)), expected);
}

#[test]
fn empty_preference_list_renders_self_closing_map() {
    assert_eq!(
        render(&[]),
        "<?xml version='1.0' encoding='utf-8' standalone='yes' ?>\n<map/>"
    );
}

#[test]
fn empty_set_self_closes() {
    let specs = vec![spec("z", "set", Some(vec!["a".into()]))];
    let values = vec![RealizedValue::Members(Vec::new())];
    assert!(render(&paired(&specs, values)).contains("\n\t<set name=\"z\"/>\n"));
}

#[test]
fn numeric_set_members_render_as_strings() {
    let specs = vec![spec("z", "set", Some(vec![Literal::Integer(1), Literal::Float(2.5)]))];
    let values = vec![RealizedValue::Members(vec![
        Literal::Integer(1),
        Literal::Float(2.5),
    ])];
    let document = render(&paired(&specs, values));
    assert!(document.contains("\t\t<string>1</string>\n\t\t<string>2.5</string>\n"));
}

#[test]
fn string_values_with_markup_are_escaped() {
    let specs = vec![spec("x", "string", Some(vec!["<b>&</b>".into()]))];
    let values = vec![scalar("<b>&</b>")];
    assert!(render(&paired(&specs, values)).contains("<string name=\"x\">&lt;b&gt;&amp;&lt;/b&gt;</string>"));
}

#[test]
fn duplicate_names_produce_duplicate_elements() {
    let specs = vec![spec("y", "boolean", None), spec("y", "boolean", None)];
    let values = vec![scalar(true), scalar(false)];
    let document = render(&paired(&specs, values));
    assert_eq!(document.matches("name=\"y\"").count(), 2);
}

#[test]
fn tree_has_one_child_per_spec_in_order() {
    let specs = vec![
        spec("b", "boolean", None),
        spec("a", "string", Some(vec!["v".into()])),
    ];
    let values = vec![scalar(true), scalar("v")];
    let tree = build_tree(&paired(&specs, values));
    assert_eq!(tree.tag(), ROOT_TAG);
    let tags: Vec<&str> = tree.children().iter().map(Node::tag).collect();
    assert_eq!(tags, ["boolean", "string"]);
    let names: Vec<&str> = tree
        .children()
        .iter()
        .map(|child| child.attributes()[0].value.as_str())
        .collect();
    assert_eq!(names, ["b", "a"]);
}

#[test]
fn every_sampled_preference_gets_a_child() {
    let specs = vec![spec("a", "boolean", None), spec("b", "boolean", None)];
    let sampled = ValueSampler::with_rng(StdRng::seed_from_u64(3)).sample_all(&specs);
    let tree = build_tree(&sampled);
    assert_eq!(tree.children().len(), 2);
    assert_eq!(render(&sampled).matches("<boolean name=").count(), 2);
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>&\"']{0,12}"
}

proptest! {
    #[test]
    fn rendering_is_deterministic_and_balanced(
        texts in proptest::collection::vec(arb_text(), 0..6),
        members in proptest::collection::vec(arb_text(), 0..4),
    ) {
        let mut specs = Vec::new();
        let mut values = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            specs.push(spec(&format!("s{i}"), "string", Some(vec![text.clone().into()])));
            values.push(scalar(text.clone()));
        }
        if !members.is_empty() {
            let domain: Vec<Literal> = members.iter().cloned().map(Literal::from).collect();
            specs.push(spec("set", "set", Some(domain.clone())));
            values.push(RealizedValue::Members(domain));
        }

        let first = render(&paired(&specs, values.clone()));
        let second = render(&paired(&specs, values.clone()));
        prop_assert_eq!(&first, &second);

        let body = first
            .strip_prefix(XML_DECLARATION)
            .and_then(|rest| rest.strip_prefix('\n'))
            .expect("declaration line");
        let opens = body.matches('<').count();
        let closes = body.matches("</").count() + body.matches("/>").count();
        // Every element is either self-closed or has a closing tag.
        prop_assert_eq!(opens, 2 * body.matches("</").count() + body.matches("/>").count());
        prop_assert!(closes > 0);
        prop_assert_eq!(body.matches("<map").count(), 1);
        prop_assert_eq!(body.matches("\n\t<").count(), specs.len());
    }
}
