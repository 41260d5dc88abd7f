//! Property tests for tree reconstruction and alignment

use proptest::prelude::*;
use trellis_core::{
    classify, parse_annotation, tokenize_annotation, AlignRules, Aligner, SurfaceToken,
};

#[derive(Debug, Clone)]
enum Shape {
    Leaf(&'static str),
    Branch(&'static str, Vec<Shape>),
}

impl Shape {
    fn write(&self, out: &mut Vec<String>) {
        match self {
            Shape::Leaf(tag) => out.push(tag.to_string()),
            Shape::Branch(name, children) => {
                out.push(name.to_string());
                for child in children {
                    child.write(out);
                }
                out.push(format!("/{name}"));
            }
        }
    }
}

const TERMINALS: &[&str] = &[
    "person_kvk_nf",
    "person_kk_nf",
    "no_et_gr_kk_þf",
    "so_1_þf_gm_nh",
    "ao",
    "fs_þgf",
    "p",
    "tö",
];

const NONTERMINALS: &[&str] = &["NP-SUBJ", "NP", "VP", "ADVP", "ADVP-DATE-REL", "PP", "IP"];

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop::sample::select(TERMINALS).prop_map(Shape::Leaf);
    leaf.prop_recursive(4, 48, 5, |inner| {
        (
            prop::sample::select(NONTERMINALS),
            prop::collection::vec(inner, 0..5),
        )
            .prop_map(|(name, children)| Shape::Branch(name, children))
    })
}

fn annotation() -> impl Strategy<Value = String> {
    prop::collection::vec(shape(), 0..4).prop_map(|children| {
        let mut out = Vec::new();
        Shape::Branch("P", children).write(&mut out);
        out.join(" ")
    })
}

proptest! {
    #[test]
    fn prop_flatten_round_trips(annotation in annotation()) {
        let tree = parse_annotation(&annotation).unwrap();
        prop_assert_eq!(tree.to_string(), annotation);
    }

    #[test]
    fn prop_terminal_order_preserved(annotation in annotation()) {
        let tree = parse_annotation(&annotation).unwrap();
        let expected: Vec<String> = tokenize_annotation(&annotation)
            .unwrap()
            .into_iter()
            .filter(|tag| tag.is_terminal())
            .map(|tag| tag.category().to_string())
            .collect();
        let actual: Vec<String> = tree
            .terminals()
            .iter()
            .map(|t| t.category().to_string())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_alignment_count_invariant(annotation in annotation(), words in 0usize..20) {
        let tree = parse_annotation(&annotation).unwrap();
        let sentence = vec!["orð"; words].join(" ");
        let tokens = SurfaceToken::words(&sentence);
        let alignment = Aligner::new(AlignRules::embedded())
            .with_sentence(&sentence)
            .align(tree, &tokens);

        prop_assert_eq!(alignment.tokens.len(), alignment.tree.terminal_count());
        for (leaf, terminal) in alignment.tree.terminals().iter().enumerate() {
            prop_assert_eq!(terminal.leaf(), leaf);
        }
    }

    #[test]
    fn prop_exact_alignment_uses_every_token(annotation in annotation()) {
        let tree = parse_annotation(&annotation).unwrap();
        let sentence = vec!["orð"; tree.terminal_count()].join(" ");
        let tokens = SurfaceToken::words(&sentence);
        let alignment = Aligner::new(AlignRules::embedded()).align(tree, &tokens);

        prop_assert!(alignment.is_exact());
        let covered: usize = alignment.tokens.iter().map(|t| t.width()).sum();
        prop_assert_eq!(covered, tokens.len());
    }

    #[test]
    fn prop_classify_idempotent(text in "\\PC{0,12}") {
        prop_assert_eq!(classify(&text), classify(&text));
    }
}
