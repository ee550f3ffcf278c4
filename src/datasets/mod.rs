use async_trait::async_trait;
use quick_xml::events::attributes::AttrError;

/// Senseval-style lexical sample corpora
pub mod senseval;

/// A corpus which can be loaded from a file
#[async_trait]
pub trait LoadableCorpus<I>: burn::data::dataset::Dataset<I> {
    /// Load the corpus
    async fn load(path: &str) -> Result<Self, CorpusError>
    where
        Self: std::marker::Sized;
}

/// Corpus Error
#[derive(thiserror::Error, Debug)]
pub enum CorpusError {
    /// The corpus file could not be read
    #[error("unable to read corpus: {0}")]
    Io(#[from] std::io::Error),

    /// The corpus is not well-formed XML
    #[error("malformed corpus XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be parsed
    #[error("malformed corpus attribute: {0}")]
    Attribute(#[from] AttrError),

    /// A required attribute is absent
    #[error("<{element}> is missing its {attribute} attribute")]
    MissingAttribute {
        /// The element name
        element: String,
        /// The attribute name
        attribute: &'static str,
    },

    /// An `<instance>` opened inside another one
    #[error("instance {0} is nested inside another instance")]
    NestedInstance(String),

    /// The corpus ended inside an `<instance>`
    #[error("instance {0} is never closed")]
    Unterminated(String),

    /// A training instance carries no `<answer>`
    #[error("instance {0} has no answer")]
    MissingAnswer(String),

    /// An answer names a sense outside the task
    #[error("instance {instance} has unknown sense {label}")]
    UnknownSense {
        /// The instance identifier
        instance: String,
        /// The unrecognised sense label
        label: String,
    },
}
