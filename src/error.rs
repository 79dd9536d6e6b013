//! Error taxonomy.
//!
//! - `SpecError`: malformed or incomplete specification data. Always fatal
//!   to the card or deck being built.
//! - `TaggingError`: a narrower kind of `SpecError` for tag registration
//!   and tag references.
//! - `MarkupError`: a narrower kind of `SpecError` for shorthand markup.
//! - `SelectionError`: a restriction string that cannot be parsed.
//! - `LoadError`: reading a specification document.
//! - `LayoutError`: fatal layout problems. The packer's "image full" signal
//!   lives in `layout::PackError` and has no counterpart here.

use thiserror::Error;

use crate::core::Footprint;
use crate::layout::Side;

/// A human error in the design of a specification.
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("no content for required field \"{field}\"")]
    Missing { field: String },

    #[error("unrecognized field in specification of \"{owner}\": \"{key}: {value}\"")]
    Unconsumed {
        owner: String,
        key: String,
        value: String,
    },

    #[error("cannot interpret {found} as {expected} for \"{owner}\"")]
    Shape {
        owner: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("no cards")]
    NoCards,

    #[error("\"{0}\" has no plan of fields")]
    NoPlan(String),

    #[error("no field above \"{from}\" is {what}")]
    NotFound { from: String, what: &'static str },

    #[error("card \"{0}\" has no tag field; tag-based filtering is impossible")]
    NoTagField(String),

    #[error("too many {0} to index")]
    TooMany(&'static str),

    #[error("invalid number of copies for \"{card}\": {value}")]
    InvalidCopies { card: String, value: String },

    #[error(transparent)]
    Tagging(#[from] TaggingError),

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error("an error occurred while processing \"{title}\": {source}")]
    Card {
        title: String,
        #[source]
        source: Box<SpecError>,
    },
}

/// Contradictory or unknown tags.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggingError {
    #[error("\"{0}\" defined more than once")]
    Duplicate(String),

    #[error("tag markup \"{0}\" does not appear in roster")]
    Unregistered(String),

    #[error("tag \"{tag}\" lacks master \"{master}\"")]
    MissingMaster { tag: String, master: String },

    #[error("tag \"{tag}\" is subordinate to unregistered \"{master}\"")]
    UnknownMaster { tag: String, master: String },

    #[error("tag \"{tag}\" cannot serve under \"{master}\", which is itself subordinate")]
    NestedHierarchy { tag: String, master: String },

    #[error("tag \"{tag}\" does not mix with its master, \"{master}\"")]
    MixedHierarchy { tag: String, master: String },
}

/// Failure to parse shorthand markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("unterminated shorthand in \"{0}\"")]
    Unterminated(String),

    #[error("unknown shorthand token \"{0}\"")]
    UnknownToken(String),

    #[error("shorthand \"{token}\" takes {expected} parameter(s), got {found}")]
    Parameters {
        token: String,
        expected: usize,
        found: usize,
    },

    #[error("shorthand still expanding after {0} rounds")]
    TooDeep(usize),
}

/// A whitelist or blacklist entry that cannot be understood.
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("invalid restriction \"{restriction}\": {source}")]
    Regex {
        restriction: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid copy count in restriction \"{0}\"")]
    Count(String),
}

/// Reading a specification document from disk or text.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("filename extension \"{0}\" is not a registered serialization format")]
    UnknownFormat(String),

    #[error("could not locate \"{0}\"")]
    NotFound(String),
}

/// Fatal layout problems.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("footprint {footprint} can never fit printable area {printable}")]
    TooSmall {
        footprint: Footprint,
        printable: Footprint,
    },

    #[error("no cards selected for layouting")]
    NoCards,

    #[error("\"{card}\" has no presenter for the {side} side")]
    NoPresenter { card: String, side: Side },

    #[error("layouter has already run")]
    AlreadyRun,
}

/// Any error raised by this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl From<TaggingError> for Error {
    fn from(err: TaggingError) -> Self {
        Error::Spec(SpecError::Tagging(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagging_error_is_spec_error() {
        let err: SpecError = TaggingError::Unregistered("x".into()).into();
        assert!(matches!(err, SpecError::Tagging(_)));
        assert_eq!(err.to_string(), "tag markup \"x\" does not appear in roster");
    }

    #[test]
    fn test_card_error_names_title() {
        let err = SpecError::Card {
            title: "Goblin".into(),
            source: Box::new(SpecError::NoCards),
        };
        assert!(err.to_string().contains("\"Goblin\""));
    }
}
