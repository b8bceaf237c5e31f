//! Dependency tree module - read-only view over one parsed sentence

use crate::error::DomainError;
use crate::token::{EntitySpan, Relation, Token};

/// Dependency parse of a single sentence
///
/// Tokens are stored in surface order and addressed by sentence-local index.
/// Child lists are precomputed at construction and kept in ascending token
/// order. The tree is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyTree {
    tokens: Vec<Token>,
    entities: Vec<EntitySpan>,
    children: Vec<Vec<usize>>,
}

impl DependencyTree {
    /// Build a tree from tokens and entity spans
    ///
    /// A token whose head points at itself is normalised to having no head.
    /// Tokens covered by an entity span inherit the span's label unless they
    /// already carry an entity type.
    ///
    /// # Errors
    /// Returns error if a head or an entity span falls outside the sentence
    pub fn new(mut tokens: Vec<Token>, entities: Vec<EntitySpan>) -> Result<Self, DomainError> {
        let len = tokens.len();

        for (index, token) in tokens.iter_mut().enumerate() {
            match token.head {
                Some(head) if head == index => token.head = None,
                Some(head) if head >= len => {
                    return Err(DomainError::InvalidHead { token: index, head, len });
                }
                _ => {}
            }
        }

        for span in &entities {
            if span.start >= span.end || span.end > len {
                return Err(DomainError::InvalidSpan {
                    start: span.start,
                    end: span.end,
                    len,
                });
            }
            for token in &mut tokens[span.start..span.end] {
                if token.entity_type.is_none() {
                    token.entity_type = Some(span.label.clone());
                }
            }
        }

        let mut children = vec![Vec::new(); len];
        for (index, token) in tokens.iter().enumerate() {
            if let Some(head) = token.head {
                children[head].push(index);
            }
        }

        Ok(Self {
            tokens,
            entities,
            children,
        })
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sentence has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens in surface order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token at an index
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Entity spans in the order the annotator produced them
    pub fn entities(&self) -> &[EntitySpan] {
        &self.entities
    }

    /// Index of the first token labeled as the sentence root
    pub fn root(&self) -> Option<usize> {
        self.tokens.iter().position(|t| t.relation == Relation::Root)
    }

    /// Direct dependents of a token, in surface order
    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A token and all of its descendants, in surface order
    ///
    /// Malformed inputs with head cycles terminate: each token is visited once.
    pub fn subtree(&self, index: usize) -> Vec<usize> {
        if index >= self.tokens.len() {
            return Vec::new();
        }

        let mut visited = vec![false; self.tokens.len()];
        let mut stack = vec![index];
        let mut collected = Vec::new();

        while let Some(current) = stack.pop() {
            if visited[current] {
                continue;
            }
            visited[current] = true;
            collected.push(current);
            stack.extend(self.children(current).iter().copied());
        }

        collected.sort_unstable();
        collected
    }

    /// Surface text of a subtree, tokens joined by single spaces
    pub fn subtree_text(&self, index: usize) -> String {
        self.subtree(index)
            .into_iter()
            .map(|i| self.tokens[i].text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Entity types found on the tokens of a subtree
    pub fn subtree_entity_types(&self, index: usize) -> Vec<&str> {
        self.subtree(index)
            .into_iter()
            .filter_map(|i| self.tokens[i].entity_type.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// "Premier odwołał ministra zdrowia wczoraj ."
    fn sample_tree() -> DependencyTree {
        let tokens = vec![
            Token::new("Premier", "premier", Relation::NominalSubject, Some(1)),
            Token::new("odwołał", "odwołać", Relation::Root, None),
            Token::new("ministra", "minister", Relation::Object, Some(1)),
            Token::new("zdrowia", "zdrowie", Relation::parse("nmod"), Some(2)),
            Token::new("wczoraj", "wczoraj", Relation::parse("advmod"), Some(1)),
            Token::new(".", ".", Relation::parse("punct"), Some(1)),
        ];
        DependencyTree::new(tokens, vec![EntitySpan::new("date", 4, 5, "wczoraj")]).unwrap()
    }

    #[test]
    fn test_root_and_children() {
        let tree = sample_tree();
        assert_eq!(tree.root(), Some(1));
        assert_eq!(tree.children(1), &[0, 2, 4, 5]);
        assert_eq!(tree.children(2), &[3]);
        assert!(tree.children(0).is_empty());
    }

    #[test]
    fn test_subtree_text_in_surface_order() {
        let tree = sample_tree();
        assert_eq!(tree.subtree_text(2), "ministra zdrowia");
        assert_eq!(tree.subtree_text(1), "Premier odwołał ministra zdrowia wczoraj .");
    }

    #[test]
    fn test_entity_types_inherited_from_spans() {
        let tree = sample_tree();
        assert_eq!(tree.token(4).unwrap().entity_type.as_deref(), Some("date"));
        assert_eq!(tree.subtree_entity_types(4), vec!["date"]);
        assert!(tree.subtree_entity_types(2).is_empty());
    }

    #[test]
    fn test_self_head_normalised() {
        let tokens = vec![Token::new("Padało", "padać", Relation::Root, Some(0))];
        let tree = DependencyTree::new(tokens, vec![]).unwrap();
        assert_eq!(tree.token(0).unwrap().head, None);
        assert!(tree.children(0).is_empty());
    }

    #[test]
    fn test_invalid_head_rejected() {
        let tokens = vec![Token::new("x", "x", Relation::Root, Some(5))];
        let err = DependencyTree::new(tokens, vec![]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidHead { head: 5, .. }));
    }

    #[test]
    fn test_invalid_span_rejected() {
        let tokens = vec![Token::new("x", "x", Relation::Root, None)];
        let err = DependencyTree::new(tokens, vec![EntitySpan::new("LOC", 0, 3, "x")]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSpan { .. }));
    }

    #[test]
    fn test_cycle_terminates() {
        let tokens = vec![
            Token::new("a", "a", Relation::parse("dep"), Some(1)),
            Token::new("b", "b", Relation::parse("dep"), Some(0)),
        ];
        let tree = DependencyTree::new(tokens, vec![]).unwrap();
        assert_eq!(tree.root(), None);
        assert_eq!(tree.subtree(0), vec![0, 1]);
    }

    #[test]
    fn test_empty_tree() {
        let tree = DependencyTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert!(tree.subtree(0).is_empty());
    }
}
