//! Scoped sequence assignment for orderable records.
//!
//! Modules are positioned within their course and contents within their
//! module. A new record whose `order` is unset receives the next position in
//! its scope: one past the largest `order` already stored for rows sharing the
//! same scope values, or `0` when the scope is empty. A record that already
//! carries an `order` is passed through untouched, and nothing here checks
//! that a manual value is unique.
//!
//! The assigner only reads. Persisting the assigned value is the job of the
//! repository that calls [`assign_order`] right before its `INSERT`.
//!
//! Two writers computing the next position for the same scope at the same
//! time can both observe the same maximum. Repositories that need distinct
//! positions must serialize inserts per scope (the Postgres repositories lock
//! the parent row inside the create transaction).

use std::future::Future;

/// Position of a record among its siblings. Never negative.
pub type Order = i32;

/// First position handed out in an empty scope.
pub const FIRST_ORDER: Order = 0;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// A single value a scope field is compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeValue {
    Int(i64),
    Text(String),
    /// Matches rows whose field is NULL.
    Null,
}

impl From<i64> for ScopeValue {
    fn from(value: i64) -> Self {
        ScopeValue::Int(value)
    }
}

impl From<&str> for ScopeValue {
    fn from(value: &str) -> Self {
        ScopeValue::Text(value.to_string())
    }
}

impl From<String> for ScopeValue {
    fn from(value: String) -> Self {
        ScopeValue::Text(value)
    }
}

impl<T: Into<ScopeValue>> From<Option<T>> for ScopeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ScopeValue::Null, Into::into)
    }
}

/// Equality filter partitioning the ordering space.
///
/// Field names are column identifiers known at compile time. An empty scope
/// matches every row of the record type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderScope {
    fields: Vec<(&'static str, ScopeValue)>,
}

impl OrderScope {
    /// A scope with no fields: all rows of the type share one sequence.
    pub fn unscoped() -> Self {
        Self::default()
    }

    /// Add an equality condition on `field`.
    pub fn with(mut self, field: &'static str, value: impl Into<ScopeValue>) -> Self {
        self.fields.push((field, value.into()));
        self
    }

    pub fn fields(&self) -> &[(&'static str, ScopeValue)] {
        &self.fields
    }

    pub fn is_unscoped(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether a row with the given field values belongs to this scope.
    ///
    /// `value_of` returns the row's value for a field name. Used by in-memory
    /// lookups; SQL lookups express the same filter as a `WHERE` clause.
    pub fn matches<F>(&self, mut value_of: F) -> bool
    where
        F: FnMut(&str) -> ScopeValue,
    {
        self.fields
            .iter()
            .all(|(field, expected)| value_of(*field) == *expected)
    }
}

// ---------------------------------------------------------------------------
// Records and lookups
// ---------------------------------------------------------------------------

/// A record pending persistence whose `order` may be assigned automatically.
pub trait Orderable {
    /// Record type (table) the sequence is computed over.
    const RECORD_TYPE: &'static str;

    /// The currently held order, if any.
    fn order(&self) -> Option<Order>;

    fn set_order(&mut self, order: Order);
}

/// Failure reported by an [`OrderLookup`].
#[derive(Debug, thiserror::Error)]
pub enum LookupError<E> {
    /// The backing table for the record type does not exist yet.
    #[error("Record type '{0}' is not provisioned")]
    Unprovisioned(&'static str),

    /// Any other store failure (connectivity, permissions, ...).
    #[error(transparent)]
    Store(E),
}

/// Read access to the largest stored `order` within a scope.
pub trait OrderLookup: Send {
    /// Error produced by the underlying store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return the greatest `order` among rows of `record_type` matching
    /// `scope`, or `None` when no row matches.
    fn find_max_order(
        &mut self,
        record_type: &'static str,
        scope: &OrderScope,
    ) -> impl Future<Output = Result<Option<Order>, LookupError<Self::Error>>> + Send;
}

/// Failure while assigning or persisting an order.
#[derive(Debug, thiserror::Error)]
pub enum OrderError<E> {
    /// The scope already holds the largest representable order.
    #[error("No order positions left after {max} in '{record_type}'")]
    Exhausted {
        record_type: &'static str,
        max: Order,
    },

    #[error(transparent)]
    Store(#[from] E),
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Next position after the largest stored one.
///
/// `None` (empty scope) yields [`FIRST_ORDER`]; `None` is also returned when
/// `max + 1` does not fit in [`Order`].
pub fn next_order(max: Option<Order>) -> Option<Order> {
    match max {
        Some(max) => max.checked_add(1),
        None => Some(FIRST_ORDER),
    }
}

/// Assign the next position in `scope` to `record` unless it already has one.
///
/// Returns the order the record carries afterwards. An unprovisioned record
/// type is treated as an empty scope; every other lookup failure is returned
/// to the caller unchanged.
pub async fn assign_order<R, L>(
    record: &mut R,
    scope: &OrderScope,
    lookup: &mut L,
) -> Result<Order, OrderError<L::Error>>
where
    R: Orderable + Send,
    L: OrderLookup,
{
    if let Some(order) = record.order() {
        return Ok(order);
    }

    let max = match lookup.find_max_order(R::RECORD_TYPE, scope).await {
        Ok(max) => max,
        Err(LookupError::Unprovisioned(_)) => None,
        Err(LookupError::Store(err)) => return Err(OrderError::Store(err)),
    };

    let order = next_order(max).ok_or(OrderError::Exhausted {
        record_type: R::RECORD_TYPE,
        max: max.unwrap_or(Order::MAX),
    })?;

    record.set_order(order);
    Ok(order)
}
