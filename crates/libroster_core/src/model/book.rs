//! Bibliographic record model and validation.
//!
//! # Responsibility
//! - Define the `Book` entity keyed by its ISBN and the boundary `BookDto`.
//! - Validate and convert DTO input field by field before persistence.
//!
//! # Invariants
//! - `isbn` is the natural primary key and is stored verbatim as supplied.
//! - A `Book` only exists after its DTO passed every validation rule.

use crate::model::dates::CivilDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static WEBSITE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("valid website regex"));

/// Bibliographic entity as persisted in the `books` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Natural primary key, ISBN-13 with optional separators.
    pub isbn: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub publisher: Option<String>,
    /// Publication date; persisted as unix seconds of midnight UTC.
    pub published: Option<CivilDate>,
    pub pages: i64,
    pub description: String,
    pub website: Option<String>,
}

/// Boundary representation of a book.
///
/// Every field is optional at the type level; acceptability is decided by
/// [`BookDto::try_into_entity`] alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDto {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    /// ISO-8601 `YYYY-MM-DD`.
    pub published: Option<String>,
    pub pages: Option<i64>,
    pub description: Option<String>,
    pub website: Option<String>,
}

/// Field-level validation failure for book input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    MissingIsbn,
    InvalidIsbn(String),
    MissingTitle,
    MissingAuthor,
    MissingDescription,
    InvalidPublished(String),
    PublishedNotInPast(String),
    InvalidWebsite(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingIsbn => write!(f, "isbn must not be blank"),
            Self::InvalidIsbn(value) => write!(f, "invalid isbn-13: `{value}`"),
            Self::MissingTitle => write!(f, "title must not be blank"),
            Self::MissingAuthor => write!(f, "author must not be blank"),
            Self::MissingDescription => write!(f, "description must not be blank"),
            Self::InvalidPublished(value) => {
                write!(f, "invalid publication date: `{value}`")
            }
            Self::PublishedNotInPast(value) => {
                write!(f, "publication date must be in the past: `{value}`")
            }
            Self::InvalidWebsite(value) => write!(f, "invalid website url: `{value}`"),
        }
    }
}

impl Error for BookValidationError {}

impl BookDto {
    /// Validates every field and converts into a persistable entity.
    ///
    /// # Contract
    /// - ISBN must be a checksum-valid ISBN-13; separators are tolerated but
    ///   the key is kept verbatim.
    /// - Title, author and description must be non-blank.
    /// - Publication date, when present, must be a real past calendar date.
    /// - Website, when present, must be an http(s) URL.
    pub fn try_into_entity(&self) -> Result<Book, BookValidationError> {
        let isbn = required_text(&self.isbn).ok_or(BookValidationError::MissingIsbn)?;
        if !is_valid_isbn13(&isbn) {
            return Err(BookValidationError::InvalidIsbn(isbn));
        }

        let title = required_text(&self.title).ok_or(BookValidationError::MissingTitle)?;
        let author = required_text(&self.author).ok_or(BookValidationError::MissingAuthor)?;
        let description =
            required_text(&self.description).ok_or(BookValidationError::MissingDescription)?;

        let published = match self.published.as_deref() {
            Some(raw) => {
                let date = CivilDate::parse_iso(raw)
                    .ok_or_else(|| BookValidationError::InvalidPublished(raw.to_string()))?;
                if date >= CivilDate::today() {
                    return Err(BookValidationError::PublishedNotInPast(raw.to_string()));
                }
                Some(date)
            }
            None => None,
        };

        if let Some(website) = self.website.as_deref() {
            if !website.trim().is_empty() && !WEBSITE_RE.is_match(website.trim()) {
                return Err(BookValidationError::InvalidWebsite(website.to_string()));
            }
        }

        Ok(Book {
            isbn,
            title,
            subtitle: self.subtitle.clone(),
            author,
            publisher: self.publisher.clone(),
            published,
            pages: self.pages.unwrap_or(0),
            description,
            website: self.website.clone(),
        })
    }
}

impl Book {
    /// Converts back to the boundary representation. Never fails.
    pub fn to_dto(&self) -> BookDto {
        BookDto {
            isbn: Some(self.isbn.clone()),
            title: Some(self.title.clone()),
            subtitle: self.subtitle.clone(),
            author: Some(self.author.clone()),
            publisher: self.publisher.clone(),
            published: self.published.map(CivilDate::to_iso),
            pages: Some(self.pages),
            description: Some(self.description.clone()),
            website: self.website.clone(),
        }
    }
}

fn required_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

/// Checksum validation for ISBN-13, ignoring `-` and space separators.
fn is_valid_isbn13(value: &str) -> bool {
    let digits: Vec<u32> = value
        .chars()
        .filter(|ch| !matches!(ch, '-' | ' '))
        .map(|ch| ch.to_digit(10))
        .collect::<Option<Vec<u32>>>()
        .unwrap_or_default();

    if digits.len() != 13 {
        return false;
    }

    let weighted: u32 = digits
        .iter()
        .enumerate()
        .map(|(index, digit)| if index % 2 == 0 { *digit } else { digit * 3 })
        .sum();
    weighted % 10 == 0
}
