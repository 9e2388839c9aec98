use chrono::{DateTime, Utc};

/// Filterable column, independent of the SQL table it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterColumn {
    /// Payload account.
    Account,
    /// Payload inventory identifier.
    InventoryId,
    /// Payload system identifier.
    SystemId,
    /// Service lookup name.
    Service,
    /// Source lookup name.
    Source,
    /// Status lookup name.
    Status,
    /// Event status message.
    StatusMessage,
    /// Payload creation time.
    PayloadCreatedAt,
    /// Event time.
    EventDate,
    /// Event row creation time.
    EventCreatedAt,
}

/// Comparison applied by one predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// Equality.
    Eq,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Gte,
}

impl ComparisonOperator {
    /// Returns the SQL operator token.
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

/// Bound value of a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateValue {
    /// Text compared for equality.
    Text(String),
    /// Timestamp bound.
    Timestamp(DateTime<Utc>),
}

/// One `column operator value` condition; a query ANDs all of its predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Column the predicate constrains.
    pub column: FilterColumn,
    /// Comparison operator.
    pub operator: ComparisonOperator,
    /// Value bound as a query parameter.
    pub value: PredicateValue,
}
