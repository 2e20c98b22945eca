use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IxbrlError>;

#[derive(Debug, Error)]
pub enum IxbrlError {
    #[error("failed to write iXBRL output: {0}")]
    Write(#[source] io::Error),

    /// A write was attempted after the sink already failed once.
    #[error("output sink failed earlier; nothing more was written")]
    SinkFailed,

    #[error("malformed markup at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("document ended inside an open <{element}> element")]
    UnexpectedEof { element: String },

    #[error("fact element <{element}> nested inside numeric fact {concept}")]
    NestedFact { concept: String, element: String },

    #[error("invalid {attribute}=\"{value}\" on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("cannot read numeral \"{display}\" for {concept} in {context}")]
    Numeral {
        concept: String,
        context: String,
        display: String,
    },
}

impl IxbrlError {
    pub(crate) fn xml(position: u64, source: impl Into<quick_xml::Error>) -> Self {
        IxbrlError::Xml {
            position,
            source: source.into(),
        }
    }
}
