//! Record store abstraction for `RosterBox`.
//!
//! This crate provides the `Database` trait the rest of the workspace talks to: a
//! document-style store addressed by a server-generated string identifier. Backends
//! implement the trait; callers never see the underlying storage engine.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![allow(clippy::module_name_repetitions)]

use async_trait::async_trait;
use thiserror::Error;

#[cfg(feature = "sqlite-rusqlite")]
pub mod rusqlite;

#[cfg(feature = "simulator")]
pub mod simulator;

#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseValue {
    Null,
    String(String),
    Bool(bool),
    Number(i64),
    Real(f64),
}

impl DatabaseValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for DatabaseValue {
    fn from(val: &str) -> Self {
        Self::String(val.to_string())
    }
}

impl From<&String> for DatabaseValue {
    fn from(val: &String) -> Self {
        Self::String(val.to_string())
    }
}

impl From<String> for DatabaseValue {
    fn from(val: String) -> Self {
        Self::String(val)
    }
}

impl From<bool> for DatabaseValue {
    fn from(val: bool) -> Self {
        Self::Bool(val)
    }
}

impl From<i64> for DatabaseValue {
    fn from(val: i64) -> Self {
        Self::Number(val)
    }
}

impl From<f64> for DatabaseValue {
    fn from(val: f64) -> Self {
        Self::Real(val)
    }
}

impl<T: Into<Self>> From<Option<T>> for DatabaseValue {
    fn from(val: Option<T>) -> Self {
        val.map_or(Self::Null, std::convert::Into::into)
    }
}

/// A single document returned from the store, as column name/value pairs in
/// storage order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub columns: Vec<(String, DatabaseValue)>,
}

impl Row {
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&DatabaseValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column_name)
            .map(|(_, value)| value)
    }

    /// The store-assigned identifier of this document.
    ///
    /// # Errors
    ///
    /// * If the row has no string `id` column
    pub fn id(&self) -> Result<&str, ParseError> {
        self.get("id")
            .and_then(DatabaseValue::as_str)
            .ok_or_else(|| ParseError::MissingValue("id".into()))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Failed to convert to type: {0:?}")]
    ConvertType(String),
    #[error("Missing required value: {0:?}")]
    MissingValue(String),
}

/// Trait for converting a store value to a concrete Rust type.
pub trait ToValueType<T> {
    /// # Errors
    ///
    /// * If the value failed to parse
    fn to_value_type(self) -> Result<T, ParseError>;
}

impl ToValueType<String> for &DatabaseValue {
    fn to_value_type(self) -> Result<String, ParseError> {
        self.as_str()
            .map(ToString::to_string)
            .ok_or_else(|| ParseError::ConvertType("String".into()))
    }
}

impl ToValueType<i64> for &DatabaseValue {
    fn to_value_type(self) -> Result<i64, ParseError> {
        self.as_i64()
            .ok_or_else(|| ParseError::ConvertType("i64".into()))
    }
}

impl ToValueType<bool> for &DatabaseValue {
    fn to_value_type(self) -> Result<bool, ParseError> {
        match self {
            DatabaseValue::Bool(value) => Ok(*value),
            DatabaseValue::Number(value) => Ok(*value != 0),
            _ => Err(ParseError::ConvertType("bool".into())),
        }
    }
}

impl<T> ToValueType<Vec<T>> for Vec<Row>
where
    for<'a> &'a Row: ToValueType<T>,
{
    fn to_value_type(self) -> Result<Vec<T>, ParseError> {
        self.iter().map(ToValueType::to_value_type).collect()
    }
}

pub trait ToValue {
    /// # Errors
    ///
    /// * If the column is missing or failed to parse
    fn to_value<T>(&self, index: &str) -> Result<T, ParseError>
    where
        for<'a> &'a DatabaseValue: ToValueType<T>;
}

impl ToValue for Row {
    fn to_value<T>(&self, index: &str) -> Result<T, ParseError>
    where
        for<'a> &'a DatabaseValue: ToValueType<T>,
    {
        self.get(index)
            .ok_or_else(|| ParseError::MissingValue(index.to_string()))?
            .to_value_type()
    }
}

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[cfg(feature = "sqlite-rusqlite")]
    #[error(transparent)]
    Rusqlite(#[from] rusqlite::RusqliteDatabaseError),
}

/// Errors for callers that both fetch and convert documents.
#[derive(Debug, Error)]
pub enum DatabaseFetchError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A document store holding records addressed by a store-generated string
/// identifier, unique per collection.
#[async_trait]
pub trait Database: Send + Sync + std::fmt::Debug {
    /// Persists a new document, assigning it a fresh identifier, and returns the
    /// stored document including its `id` column.
    async fn insert(
        &self,
        collection: &str,
        values: &[(&str, DatabaseValue)],
    ) -> Result<Row, DatabaseError>;

    /// Returns every document in the collection, in storage order.
    async fn find_all(&self, collection: &str) -> Result<Vec<Row>, DatabaseError>;

    /// Returns the document with the given identifier, if present.
    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Row>, DatabaseError>;

    /// Replaces the whole document body for the given identifier, leaving the
    /// identifier untouched. Returns `None`, with no write performed, when no
    /// document has that identifier.
    async fn replace_by_id(
        &self,
        collection: &str,
        id: &str,
        values: &[(&str, DatabaseValue)],
    ) -> Result<Option<Row>, DatabaseError>;

    /// Removes the document with the given identifier, returning it, or `None`
    /// when it was already absent.
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<Row>, DatabaseError>;

    /// Executes a raw statement against the backend. Used for schema init.
    async fn exec_raw(&self, statement: &str) -> Result<(), DatabaseError>;
}
