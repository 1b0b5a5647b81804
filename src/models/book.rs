//! Book record model and related request/response types

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Current instant, truncated to millisecond precision (ISO-8601 `...T12:00:00.000Z`)
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Generate a new opaque book identifier
pub fn new_book_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Full book record as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque unique identifier, immutable after creation
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    /// Derived: true iff `read_page == page_count`
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from a validated payload. Both timestamps are set to `at`.
    pub fn create(id: String, payload: BookPayload, at: DateTime<Utc>) -> Self {
        Self {
            id,
            finished: payload.is_finished(),
            name: payload.name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            reading: payload.reading,
            inserted_at: at,
            updated_at: at,
        }
    }

    /// Replace every user-editable field. `id` and `inserted_at` are kept.
    pub fn apply(&mut self, payload: BookPayload, at: DateTime<Utc>) {
        self.finished = payload.is_finished();
        self.name = payload.name;
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading;
        self.updated_at = at;
    }
}

/// Summary projection used by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// A rule broken by a create/update payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BookViolation {
    /// `readPage` is greater than `pageCount`
    InvalidPageRange,
    /// `name` is absent, null or empty
    MissingName,
}

impl BookViolation {
    pub const INVALID_PAGE_RANGE: &'static str = "invalid_page_range";
    pub const MISSING_NAME: &'static str = "missing_name";

    fn from_code(code: &str) -> Option<Self> {
        match code {
            Self::INVALID_PAGE_RANGE => Some(Self::InvalidPageRange),
            Self::MISSING_NAME => Some(Self::MissingName),
            _ => None,
        }
    }

    /// Human readable reason, without the operation prefix
    pub fn reason(&self) -> &'static str {
        match self {
            BookViolation::InvalidPageRange => "readPage tidak boleh lebih besar dari pageCount",
            BookViolation::MissingName => "Mohon isi nama buku",
        }
    }
}

/// Create / update request body
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_page_range", skip_on_field_errors = false))]
pub struct BookPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1, code = "missing_name"))]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reading: bool,
}

impl BookPayload {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }

    /// Run the declarative checks and return the payload, or every broken rule.
    ///
    /// Violations are ordered by precedence: the page range check comes before
    /// the name check.
    pub fn validated(self) -> Result<Self, Vec<BookViolation>> {
        let Err(errors) = self.validate() else {
            return Ok(self);
        };

        let mut violations: Vec<BookViolation> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|err| BookViolation::from_code(&err.code))
            .collect();
        violations.sort();
        violations.dedup();
        Err(violations)
    }
}

fn validate_page_range(payload: &BookPayload) -> Result<(), ValidationError> {
    if payload.read_page > payload.page_count {
        return Err(ValidationError::new(BookViolation::INVALID_PAGE_RANGE));
    }
    Ok(())
}

/// Treat an explicit JSON `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List filters. `reading` and `finished` are booleans given as `0`/`1`;
/// any other value matches no book.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

/// The single filter honored for a list call.
///
/// Flag filters hold `None` when the query value was neither `0` nor `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    Name(String),
    Reading(Option<bool>),
    Finished(Option<bool>),
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

impl BookQuery {
    /// Pick the filter to apply: `name`, else `reading`, else `finished`.
    /// Later filters are ignored once an earlier one is supplied.
    pub fn filter(&self) -> Option<BookFilter> {
        if let Some(name) = &self.name {
            return Some(BookFilter::Name(name.to_lowercase()));
        }
        if let Some(reading) = &self.reading {
            return Some(BookFilter::Reading(parse_flag(reading)));
        }
        self.finished
            .as_deref()
            .map(|finished| BookFilter::Finished(parse_flag(finished)))
    }
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::Name(needle) => book.name.to_lowercase().contains(needle.as_str()),
            BookFilter::Reading(flag) => *flag == Some(book.reading),
            BookFilter::Finished(flag) => *flag == Some(book.finished),
        }
    }
}
