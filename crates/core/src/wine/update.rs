//! Partial-update expression construction.
//!
//! Builds a `SET` expression from a sparse [`UpdateWineRequest`]: each mutable
//! field is assigned only when the caller supplied that same field, and
//! `updatedAt` is refreshed only when at least one field was assigned.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{UpdateWineRequest, Wine};

/// Name of the timestamp attribute refreshed by every non-empty update.
pub const UPDATED_AT: &str = "updatedAt";

/// A single `field = :field` assignment with its bound value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAssignment {
    Kind(String),
    Price(Value),
    Featured(Value),
    Image(Value),
    Name(Value),
}

impl FieldAssignment {
    /// Stored attribute name.
    pub fn attribute(&self) -> &'static str {
        match self {
            FieldAssignment::Kind(_) => "type",
            FieldAssignment::Price(_) => "price",
            FieldAssignment::Featured(_) => "featured",
            FieldAssignment::Image(_) => "image",
            FieldAssignment::Name(_) => "name",
        }
    }

    fn apply_to(&self, wine: &mut Wine) {
        match self {
            FieldAssignment::Kind(v) => wine.kind = Some(v.clone()),
            FieldAssignment::Price(v) => wine.price = Some(v.clone()),
            FieldAssignment::Featured(v) => wine.featured = Some(v.clone()),
            FieldAssignment::Image(v) => wine.image = Some(v.clone()),
            FieldAssignment::Name(v) => wine.name = Some(v.clone()),
        }
    }
}

/// A conditional field-set expression plus its bound values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateExpression {
    assignments: Vec<FieldAssignment>,
    updated_at: Option<DateTime<Utc>>,
}

impl UpdateExpression {
    /// Builds the expression for `request`, stamping `now` as `updatedAt`
    /// when any field is assigned.
    pub fn from_request(request: &UpdateWineRequest, now: DateTime<Utc>) -> Self {
        let candidates = [
            request.kind.clone().map(FieldAssignment::Kind),
            request.price.clone().map(FieldAssignment::Price),
            request.featured.clone().map(FieldAssignment::Featured),
            request.image.clone().map(FieldAssignment::Image),
            request.name.clone().map(FieldAssignment::Name),
        ];

        let assignments: Vec<FieldAssignment> = candidates.into_iter().flatten().collect();
        let updated_at = (!assignments.is_empty()).then_some(now);

        Self {
            assignments,
            updated_at,
        }
    }

    /// True when the request supplied no mutable field. Such an expression
    /// must never be sent to storage.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn assignments(&self) -> &[FieldAssignment] {
        &self.assignments
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Renders the `SET` clause using `#attr` name aliases and `:attr` value
    /// placeholders. Returns `None` for an empty expression.
    pub fn to_set_clause(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let clauses: Vec<String> = self
            .attribute_names()
            .iter()
            .map(|attr| format!("#{attr} = :{attr}"))
            .collect();

        Some(format!("SET {}", clauses.join(", ")))
    }

    /// Attribute names referenced by the clause, in order, `updatedAt` last.
    pub fn attribute_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.assignments.iter().map(|a| a.attribute()).collect();
        if self.updated_at.is_some() {
            names.push(UPDATED_AT);
        }
        names
    }

    /// Applies the expression to an in-memory record.
    pub fn apply_to(&self, wine: &mut Wine) {
        for assignment in &self.assignments {
            assignment.apply_to(wine);
        }
        if let Some(updated_at) = self.updated_at {
            wine.updated_at = updated_at;
        }
    }
}
