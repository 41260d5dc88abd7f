//! Flat parse-tree reconstruction with multi-word token alignment
//!
//! An external parser describes a sentence as a flat annotation: a
//! whitespace separated stream of named open tags, close tags and
//! terminal tags. This crate turns that stream back into a tree and
//! aligns the tree's terminals with the tokens of an independent
//! tokenizer, merging multi-word names and idiomatic phrases.
//!
//! # Architecture
//!
//! - [`tag`]: lexical classification of single tags
//! - [`builder`]: name-checked bracket matching into a [`Node`] tree
//! - [`features`]: terminal tags parsed into feature bundles
//! - [`align`]: two-phase reconciliation of terminals and tokens
//!
//! # Example
//!
//! ```rust
//! use trellis_core::{parse_annotation, AlignRules, Aligner, SurfaceToken};
//!
//! let sentence = "Ingibjörg Sólrún Gísladóttir kemur á morgun";
//! let tree = parse_annotation(
//!     "P NP-SUBJ person_kvk_nf person_kvk_nf person_kvk_nf /NP-SUBJ \
//!      VP so_et_fh_nt_p3 /VP ADVP-DATE-REL ao ao /ADVP-DATE-REL /P",
//! )
//! .unwrap();
//! let tokens = SurfaceToken::words(sentence);
//!
//! let alignment = Aligner::new(AlignRules::embedded())
//!     .with_sentence(sentence)
//!     .align(tree, &tokens);
//!
//! assert_eq!(alignment.tokens.len(), 3);
//! assert_eq!(alignment.tokens[0].text, "Ingibjörg Sólrún Gísladóttir");
//! ```

pub mod align;
pub mod builder;
pub mod error;
pub mod features;
pub mod tag;
pub mod token;
pub mod tree;

pub use align::{
    align, detect_groups, AlignRules, Aligner, Alignment, AlignmentWarning, MergeGroup,
    MergeReason,
};
pub use builder::{build, parse_annotation, TreeBuilder};
pub use error::{CoreError, FormatError, Result, RulesError, StructuralError};
pub use features::{Case, Features, Gender, Number, Person, TerminalTag};
pub use tag::{classify, matching_nonterminal, tokenize_annotation, FlatTag, TagKind};
pub use token::{LogicalToken, Span, SurfaceToken, TokenKind};
pub use tree::{Node, Nonterminal, Terminal};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_integration() {
        let sentence = "hvenær kemur ásinn";
        let tree = parse_annotation(
            "P S-QUE QBusArrivalTime ao so_et_fh QBus QBusWord no_et_gr_kk_nf /QBusWord /QBus /QBusArrivalTime /S-QUE /P",
        )
        .unwrap();
        let alignment = Aligner::new(AlignRules::embedded())
            .with_sentence(sentence)
            .align(tree, &SurfaceToken::words(sentence));

        assert!(alignment.is_exact());
        assert_eq!(alignment.tokens.len(), alignment.tree.terminal_count());
        assert_eq!(alignment.tokens[2].text, "ásinn");
    }
}
