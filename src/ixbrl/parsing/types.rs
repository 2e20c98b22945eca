use serde::{Deserialize, Serialize};

/// A decoded `ix:nonFraction`. `amount` is the canonical value with scale
/// and sign already applied, `None` when `display` is not a number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericFact {
    pub concept: String,
    pub context: String,
    pub unit: String,
    pub scale: i32,
    pub format: Option<String>,
    pub negated: bool,
    pub display: String,
    pub amount: Option<i64>,
    pub tuple_ref: Option<String>,
    pub order: Option<String>,
}

/// A decoded `ix:nonNumeric`. `text` holds only the directly owned
/// characters; text of nested facts belongs to those facts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFact {
    pub concept: String,
    pub context: String,
    pub text: String,
    pub id: Option<String>,
    pub continued_at: Option<String>,
    pub tuple_ref: Option<String>,
    pub order: Option<String>,
}

/// An `ix:tuple` declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupleDecl {
    pub concept: String,
    pub tuple_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fact {
    Numeric(NumericFact),
    Text(TextFact),
    Tuple(TupleDecl),
}

impl Fact {
    pub fn concept(&self) -> &str {
        match self {
            Fact::Numeric(f) => &f.concept,
            Fact::Text(f) => &f.concept,
            Fact::Tuple(t) => &t.concept,
        }
    }
}

/// The text of one `ix:continuation`, possibly continued further.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuation {
    pub id: String,
    pub text: String,
    pub continued_at: Option<String>,
}

/// Everything one scan pulls out of a document, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub facts: Vec<Fact>,
    pub continuations: Vec<Continuation>,
}

impl Extraction {
    pub fn append(&mut self, mut other: Extraction) {
        self.facts.append(&mut other.facts);
        self.continuations.append(&mut other.continuations);
    }
}
