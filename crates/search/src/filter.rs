//! The generic filter DTO.
//!
//! A [`SearchRequest`] describes what to search for without committing to any
//! backend's query language: field/operator/value triples that AND together,
//! an optional exclusive lower bound on the creation timestamp, and an
//! optional sort directive. The [`crate::query`] module turns it into a
//! backend query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A generic search request.
///
/// All fields are optional so the DTO can arrive as a sparse HTTP body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Filter criteria; zero or more, combined with AND semantics.
    #[serde(default)]
    pub criteria: Vec<FilterCriterion>,

    /// Exclusive lower bound on the record's creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_since: Option<DateTime<Utc>>,

    /// Field to sort results by. When absent the backend's order is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// Sort direction, only meaningful together with `sort_by`.
    #[serde(default)]
    pub order: SortOrder,
}

impl SearchRequest {
    /// Creates an empty request (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion.
    pub fn with_criterion(mut self, criterion: FilterCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Sets the exclusive creation-timestamp lower bound.
    pub fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.created_since = Some(since);
        self
    }
}

/// One field/operator/value triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriterion {
    /// The document field the criterion applies to.
    pub field: String,

    /// The comparison operator; defaults to equality.
    #[serde(default)]
    pub op: FilterOp,

    /// The comparison value. JSON so strings, numbers, and booleans all work.
    pub value: Value,
}

impl FilterCriterion {
    /// Creates an equality criterion.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    /// Creates a criterion with an explicit operator.
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

/// Comparison operators supported by the request builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    #[default]
    Eq,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// String prefix match.
    Prefix,
    /// Full-text match on an analyzed field.
    Match,
}

/// Sort direction for the optional sort directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// The wire keyword backends expect.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}
