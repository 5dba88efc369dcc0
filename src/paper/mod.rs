//! Paper document model, structural validation and section numbering.

pub mod model;
pub mod numbering;
pub mod validation;

pub use model::{
    Author, AuthorField, Collection, DocumentField, PaperDocument, PaperError, Section,
    MAX_AUTHORS, MIN_AUTHORS,
};
pub use numbering::{ordinal, section_label, to_roman, NumberingError};
pub use validation::{ValidationError, ValidationErrors};
