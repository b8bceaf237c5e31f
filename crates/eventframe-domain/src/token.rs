//! Token module - the per-word layer of an external parse

/// Grammatical relation of a token to its syntactic head
///
/// Only the relations the slot engine distinguishes get their own variant;
/// every other label is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The sentence predicate
    Root,

    /// Nominal subject (`nsubj`)
    NominalSubject,

    /// Direct object (`obj`, `dobj`)
    Object,

    /// Passive nominal subject (`nsubj:pass`, `nsubjpass`)
    PassiveSubject,

    /// Oblique nominal modifier (`obl`)
    Oblique,

    /// Any other relation label
    Other(String),
}

impl Relation {
    /// Parse a Universal Dependencies relation label
    pub fn parse(label: &str) -> Self {
        match label {
            "ROOT" | "root" => Relation::Root,
            "nsubj" => Relation::NominalSubject,
            "obj" | "dobj" => Relation::Object,
            "nsubj:pass" | "nsubjpass" => Relation::PassiveSubject,
            "obl" => Relation::Oblique,
            other => Relation::Other(other.to_string()),
        }
    }

    /// Label as it appears in UD output
    pub fn as_str(&self) -> &str {
        match self {
            Relation::Root => "ROOT",
            Relation::NominalSubject => "nsubj",
            Relation::Object => "obj",
            Relation::PassiveSubject => "nsubj:pass",
            Relation::Oblique => "obl",
            Relation::Other(label) => label,
        }
    }
}

/// A single token of a parsed sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface form
    pub text: String,

    /// Dictionary form
    pub lemma: String,

    /// Relation to the head token
    pub relation: Relation,

    /// Sentence-local index of the head, `None` for the root
    pub head: Option<usize>,

    /// Entity type covering this token, if any
    pub entity_type: Option<String>,
}

impl Token {
    /// Create a token without an entity annotation
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        relation: Relation,
        head: Option<usize>,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            relation,
            head,
            entity_type: None,
        }
    }

    /// Attach an entity type
    pub fn with_entity(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }
}

/// A labeled run of tokens naming an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    /// Entity type tag (e.g. `placeName`, `date`, `GPE`)
    pub label: String,

    /// First token index
    pub start: usize,

    /// One past the last token index
    pub end: usize,

    /// Surface text of the span
    pub text: String,
}

impl EntitySpan {
    /// Create a new entity span
    pub fn new(label: impl Into<String>, start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            text: text.into(),
        }
    }

    /// Whether the span covers a token index
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}
