//! Slot extraction engine
//!
//! Walks the first-level dependents of the sentence predicate and maps them
//! onto the event frame. Grandchildren only contribute through their
//! ancestor's subtree text; they are never classified on their own.

use crate::config::ExtractorConfig;
use eventframe_domain::{DependencyTree, EventFrame, EventFrameBuilder, Relation, Slot};
use tracing::debug;

/// Deterministic rule engine producing one [`EventFrame`] per sentence
#[derive(Debug, Clone, Default)]
pub struct SlotExtractor {
    config: ExtractorConfig,
}

impl SlotExtractor {
    /// Create an engine with the given lexicon
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// The lexicon in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the event frame of one sentence
    ///
    /// A sentence without a root yields a frame with every slot unset.
    pub fn extract(&self, tree: &DependencyTree) -> EventFrame {
        let mut frame = EventFrameBuilder::new();

        let Some((root, root_token)) = tree.root().and_then(|i| tree.token(i).map(|t| (i, t))) else {
            debug!("No root in sentence of {} tokens, returning empty frame", tree.len());
            return frame.build();
        };

        frame.fill(Slot::Trigger, root_token.lemma.as_str());

        for &child in tree.children(root) {
            let Some(token) = tree.token(child) else {
                continue;
            };

            match token.relation {
                Relation::NominalSubject => {
                    frame.fill(Slot::Agent, tree.subtree_text(child));
                }
                Relation::Object | Relation::PassiveSubject => {
                    frame.fill(Slot::Patient, tree.subtree_text(child));
                }
                Relation::Oblique => {
                    let text = tree.subtree_text(child);
                    if let Some(slot) = self.classify_oblique(tree, child, &text) {
                        frame.fill(slot, text);
                    }
                }
                _ => {}
            }
        }

        // Entity layer only fills what the dependency rules left empty
        for entity in tree.entities() {
            if self.config.is_place(&entity.label) {
                frame.fill(Slot::Location, entity.text.as_str());
            }
            if self.config.is_time(&entity.label) {
                frame.fill(Slot::Time, entity.text.as_str());
            }
        }

        frame.build()
    }

    /// Decide which slot an oblique dependent belongs to
    ///
    /// Place entities outrank temporal evidence, which outranks the locative
    /// preposition fallback.
    fn classify_oblique(&self, tree: &DependencyTree, child: usize, text: &str) -> Option<Slot> {
        let entity_types = tree.subtree_entity_types(child);

        if entity_types.iter().any(|t| self.config.is_place(t)) {
            return Some(Slot::Location);
        }

        let has_time_entity = entity_types.iter().any(|t| self.config.is_time(t));
        let has_temporal_marker = self
            .config
            .temporal_markers
            .iter()
            .any(|marker| text.contains(marker.as_str()));
        if has_time_entity || has_temporal_marker {
            return Some(Slot::Time);
        }

        let padded = format!(" {}", text);
        if self
            .config
            .locative_markers
            .iter()
            .any(|marker| padded.contains(marker.as_str()))
        {
            return Some(Slot::Location);
        }

        None
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use eventframe_domain::Token;
    use proptest::prelude::*;

    const RELATIONS: [&str; 7] = ["nsubj", "obj", "nsubj:pass", "obl", "nmod", "punct", "case"];

    /// Token 0 is the root; every other token hangs off an earlier one
    fn tree_from(spec: &[(usize, usize)], relations: &[&str]) -> DependencyTree {
        let tokens = spec
            .iter()
            .enumerate()
            .map(|(i, &(head, rel))| {
                if i == 0 {
                    Token::new("w0", "root", Relation::Root, None)
                } else {
                    let dep = relations[rel % relations.len()];
                    Token::new(format!("w{}", i), format!("l{}", i), Relation::parse(dep), Some(head % i))
                }
            })
            .collect();
        DependencyTree::new(tokens, vec![]).unwrap()
    }

    proptest! {
        /// Property: extraction is deterministic
        #[test]
        fn test_extraction_idempotent(spec in prop::collection::vec((0usize..64, 0usize..64), 1..16)) {
            let tree = tree_from(&spec, &RELATIONS);
            let extractor = SlotExtractor::default();
            prop_assert_eq!(extractor.extract(&tree), extractor.extract(&tree));
        }

        /// Property: every frame has five slots and a trigger when rooted
        #[test]
        fn test_frame_shape(spec in prop::collection::vec((0usize..64, 0usize..64), 1..16)) {
            let tree = tree_from(&spec, &RELATIONS);
            let frame = SlotExtractor::default().extract(&tree);
            prop_assert_eq!(frame.iter().count(), 5);
            prop_assert_eq!(frame.get(Slot::Trigger).as_deref(), Some("root"));
        }

        /// Property: without obliques or entities, location and time stay unset
        #[test]
        fn test_no_oblique_no_location_or_time(spec in prop::collection::vec((0usize..64, 0usize..64), 1..16)) {
            let tree = tree_from(&spec, &["nsubj", "obj", "nsubj:pass", "nmod", "punct"]);
            let frame = SlotExtractor::default().extract(&tree);
            prop_assert!(!frame.get(Slot::Location).is_set());
            prop_assert!(!frame.get(Slot::Time).is_set());
        }
    }
}
