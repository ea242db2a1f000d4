//! The search request builder.
//!
//! Translates a [`SearchRequest`] into Elasticsearch Query DSL JSON. Building
//! is a pure transformation: it either yields a [`SearchQuery`] ready to send
//! or a [`BuildError`], and a query that fails to build is never dispatched.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::error::BuildError;
use crate::filter::{FilterCriterion, FilterOp, SearchRequest};
use crate::index;

/// The document field date-cursor searches range over by default.
pub const CREATED_FIELD: &str = "created";

/// A complete query body ready to be sent to the backend.
///
/// Transient: it exists only for the duration of one search call and has no
/// identity of its own.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// The logical index to search.
    pub index: String,
    /// The complete query body.
    pub body: Value,
}

/// Builds backend queries for one logical index.
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    index: &'a str,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a builder for `index`.
    ///
    /// Fails when the index name is empty or not a known logical index, so
    /// malformed requests are stopped before they reach the backend.
    pub fn new(index: &'a str) -> Result<Self, BuildError> {
        if index.is_empty() {
            return Err(BuildError::EmptyIndexName);
        }
        if !index::is_known(index) {
            return Err(BuildError::UnknownIndex {
                name: index.to_string(),
            });
        }
        Ok(Self { index })
    }

    /// Builds a query from a filter request.
    ///
    /// All criteria AND together; an empty request with no cursor becomes a
    /// match-all query.
    pub fn build(&self, request: &SearchRequest) -> Result<SearchQuery, BuildError> {
        let mut must_clauses = Vec::with_capacity(request.criteria.len() + 1);
        for criterion in &request.criteria {
            must_clauses.push(build_criterion_clause(criterion)?);
        }
        if let Some(since) = request.created_since {
            must_clauses.push(created_after_clause(CREATED_FIELD, since));
        }
        Ok(self.assemble(must_clauses, request))
    }

    /// Builds a query matching records whose `field` is strictly after `since`.
    pub fn build_created_since(
        &self,
        field: &str,
        since: DateTime<Utc>,
    ) -> Result<SearchQuery, BuildError> {
        if field.is_empty() {
            return Err(BuildError::InvalidCriterion {
                field: String::new(),
                message: "cursor field name is empty".to_string(),
            });
        }
        let clauses = vec![created_after_clause(field, since)];
        Ok(self.assemble(clauses, &SearchRequest::default()))
    }

    /// Builds a query combining a filter request with a date cursor.
    pub fn build_filtered_since(
        &self,
        request: &SearchRequest,
        since: DateTime<Utc>,
    ) -> Result<SearchQuery, BuildError> {
        let mut must_clauses = Vec::with_capacity(request.criteria.len() + 1);
        for criterion in &request.criteria {
            must_clauses.push(build_criterion_clause(criterion)?);
        }
        must_clauses.push(created_after_clause(CREATED_FIELD, since));
        Ok(self.assemble(must_clauses, request))
    }

    /// Assembles the final body from the collected clauses.
    fn assemble(&self, must_clauses: Vec<Value>, request: &SearchRequest) -> SearchQuery {
        let query = if must_clauses.is_empty() {
            json!({ "match_all": {} })
        } else {
            json!({ "bool": { "must": must_clauses } })
        };

        let mut body = json!({ "query": query });

        if let Some(ref sort_by) = request.sort_by {
            let sort_field = sort_by.as_str();
            body["sort"] = json!([
                { sort_field: { "order": request.order.as_str() } }
            ]);
        }

        SearchQuery {
            index: self.index.to_string(),
            body,
        }
    }
}

/// Builds the strict "created after" range clause.
fn created_after_clause(field: &str, since: DateTime<Utc>) -> Value {
    json!({ "range": { field: { "gt": since.to_rfc3339() } } })
}

/// Builds the clause for one criterion.
fn build_criterion_clause(criterion: &FilterCriterion) -> Result<Value, BuildError> {
    if criterion.field.is_empty() {
        return Err(BuildError::InvalidCriterion {
            field: String::new(),
            message: "field name is empty".to_string(),
        });
    }
    if criterion.value.is_null() {
        return Err(BuildError::InvalidCriterion {
            field: criterion.field.clone(),
            message: "value is null".to_string(),
        });
    }

    let field = criterion.field.as_str();
    let value = &criterion.value;

    let clause = match criterion.op {
        FilterOp::Eq => json!({ "term": { field: value } }),
        FilterOp::Gt => json!({ "range": { field: { "gt": value } } }),
        FilterOp::Gte => json!({ "range": { field: { "gte": value } } }),
        FilterOp::Lt => json!({ "range": { field: { "lt": value } } }),
        FilterOp::Lte => json!({ "range": { field: { "lte": value } } }),
        FilterOp::Prefix => json!({ "prefix": { field: value } }),
        FilterOp::Match => json!({ "match": { field: value } }),
    };
    Ok(clause)
}
