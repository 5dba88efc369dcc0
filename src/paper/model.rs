//! Structured content of a conference paper and the operations that edit it.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::numbering::{section_label, NumberingError};
use super::validation::ValidationErrors;

/// Upper bound on the author roster.
pub const MAX_AUTHORS: usize = 6;
/// Lower bound on the author roster.
pub const MIN_AUTHORS: usize = 1;

/// One entry in the author roster. Roster order is print order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
    /// e.g. "Member, IEEE"
    pub membership: String,
    pub department: String,
    pub organization: String,
    pub city_country: String,
    /// Email address or ORCID identifier
    pub email: String,
}

/// A body section, possibly nested.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub subsections: Vec<Section>,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            subsections: Vec::new(),
        }
    }

    pub fn with_subsection(mut self, subsection: Section) -> Self {
        self.subsections.push(subsection);
        self
    }
}

/// Root representation of one paper. Field names on the wire are camelCase.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaperDocument {
    #[serde(default)]
    pub title: String,
    /// e.g. "(Invited Paper)"
    #[serde(default)]
    pub paper_notice: String,
    #[serde(default)]
    pub funding: String,
    #[serde(default = "drop_cap_default")]
    pub drop_cap_enabled: bool,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    /// Comma separated at the semantic level, never parsed here.
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Raw bibliography markup.
    #[serde(default)]
    pub references: String,
}

fn drop_cap_default() -> bool {
    true
}

impl Default for PaperDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            paper_notice: String::new(),
            funding: String::new(),
            drop_cap_enabled: true,
            authors: vec![Author::default()],
            abstract_text: String::new(),
            keywords: String::new(),
            sections: vec![
                Section::new("Introduction", ""),
                Section::new("Section II", ""),
            ],
            references: String::new(),
        }
    }
}

/// Replacement value for one top-level field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentField {
    Title(String),
    PaperNotice(String),
    Funding(String),
    DropCapEnabled(bool),
    Abstract(String),
    Keywords(String),
    References(String),
}

/// Addressable fields of an [`Author`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorField {
    FirstName,
    LastName,
    Membership,
    Department,
    Organization,
    CityCountry,
    Email,
}

impl AuthorField {
    pub const ALL: [AuthorField; 7] = [
        AuthorField::FirstName,
        AuthorField::LastName,
        AuthorField::Membership,
        AuthorField::Department,
        AuthorField::Organization,
        AuthorField::CityCountry,
        AuthorField::Email,
    ];

    /// Wire name of the field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Membership => "membership",
            Self::Department => "department",
            Self::Organization => "organization",
            Self::CityCountry => "cityCountry",
            Self::Email => "email",
        }
    }

    /// Label shown to the author.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Membership => "Membership",
            Self::Department => "Department",
            Self::Organization => "Organization",
            Self::CityCountry => "City, Country",
            Self::Email => "Email or ORCID",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Membership)
    }

    pub fn get<'a>(&self, author: &'a Author) -> &'a str {
        match self {
            Self::FirstName => &author.first_name,
            Self::LastName => &author.last_name,
            Self::Membership => &author.membership,
            Self::Department => &author.department,
            Self::Organization => &author.organization,
            Self::CityCountry => &author.city_country,
            Self::Email => &author.email,
        }
    }

    fn slot<'a>(&self, author: &'a mut Author) -> &'a mut String {
        match self {
            Self::FirstName => &mut author.first_name,
            Self::LastName => &mut author.last_name,
            Self::Membership => &mut author.membership,
            Self::Department => &mut author.department,
            Self::Organization => &mut author.organization,
            Self::CityCountry => &mut author.city_country,
            Self::Email => &mut author.email,
        }
    }
}

impl std::str::FromStr for AuthorField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key() == s)
            .ok_or_else(|| format!("unknown author field '{s}'"))
    }
}

/// Collection addressed by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Authors,
    Sections,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authors => f.write_str("author"),
            Self::Sections => f.write_str("section"),
        }
    }
}

/// Errors raised by document mutations. These indicate a caller defect.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaperError {
    #[error("{target} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        target: Collection,
        index: usize,
        len: usize,
    },
}

fn check_index(target: Collection, index: usize, len: usize) -> Result<(), PaperError> {
    if index < len {
        Ok(())
    } else {
        Err(PaperError::IndexOutOfRange { target, index, len })
    }
}

impl PaperDocument {
    /// Fresh document: one empty author, "Introduction" and "Section II".
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: DocumentField) {
        match field {
            DocumentField::Title(value) => self.title = value,
            DocumentField::PaperNotice(value) => self.paper_notice = value,
            DocumentField::Funding(value) => self.funding = value,
            DocumentField::DropCapEnabled(value) => self.drop_cap_enabled = value,
            DocumentField::Abstract(value) => self.abstract_text = value,
            DocumentField::Keywords(value) => self.keywords = value,
            DocumentField::References(value) => self.references = value,
        }
    }

    pub fn set_author_field(
        &mut self,
        index: usize,
        field: AuthorField,
        value: impl Into<String>,
    ) -> Result<(), PaperError> {
        check_index(Collection::Authors, index, self.authors.len())?;
        *field.slot(&mut self.authors[index]) = value.into();
        Ok(())
    }

    /// Appends an empty author. Returns `false` once the roster is full.
    pub fn add_author(&mut self) -> bool {
        if self.authors.len() >= MAX_AUTHORS {
            log::debug!("author roster already has {MAX_AUTHORS} entries");
            return false;
        }
        self.authors.push(Author::default());
        true
    }

    /// Removes the author at `index`. The last remaining author is never removed.
    pub fn remove_author(&mut self, index: usize) -> Result<bool, PaperError> {
        if self.authors.len() <= MIN_AUTHORS {
            return Ok(false);
        }
        check_index(Collection::Authors, index, self.authors.len())?;
        self.authors.remove(index);
        Ok(true)
    }

    pub fn set_section_content(
        &mut self,
        index: usize,
        content: impl Into<String>,
    ) -> Result<(), PaperError> {
        check_index(Collection::Sections, index, self.sections.len())?;
        self.sections[index].content = content.into();
        Ok(())
    }

    pub fn set_section_title(
        &mut self,
        index: usize,
        title: impl Into<String>,
    ) -> Result<(), PaperError> {
        check_index(Collection::Sections, index, self.sections.len())?;
        self.sections[index].title = title.into();
        Ok(())
    }

    pub fn add_section(&mut self, title: impl Into<String>) {
        self.sections.push(Section::new(title, ""));
    }

    /// Removes a numbered section. The introduction stays in place.
    pub fn remove_section(&mut self, index: usize) -> Result<bool, PaperError> {
        check_index(Collection::Sections, index, self.sections.len())?;
        if index == 0 {
            return Ok(false);
        }
        self.sections.remove(index);
        Ok(true)
    }

    /// Display labels of the top-level sections, in order.
    pub fn section_labels(&self) -> Result<Vec<String>, NumberingError> {
        (0..self.sections.len()).map(section_label).collect()
    }

    pub fn validate_for_submission(&self) -> ValidationErrors {
        super::validation::validate_document(self)
    }
}
