//! Document query builder using SeaQuery.
//!
//! Generates SQL against the `document` table:
//! - Collection scoping
//! - JSONB field predicates on string values (`body->>'field'`)
//! - Ordering by time-ordered id
//! - Skip/limit pagination

use sea_query::{
    Alias, Asterisk, Expr, Order, PostgresQueryBuilder, Query, SelectStatement, SimpleExpr,
};

use super::{Clause, Collection, Filter, FindOptions, SortOrder};

/// Table holding every collection.
pub const DOCUMENT_TABLE: &str = "document";

/// Largest LIMIT/OFFSET PostgreSQL accepts (`bigint`).
const MAX_ROWS: u64 = i64::MAX as u64;

/// Query builder for document reads.
pub struct DocumentQueryBuilder<'a> {
    collection: Collection,
    filter: &'a Filter,
}

impl<'a> DocumentQueryBuilder<'a> {
    pub fn new(collection: Collection, filter: &'a Filter) -> Self {
        Self { collection, filter }
    }

    /// Build the SELECT query with ordering and pagination.
    pub fn build_find(&self, options: FindOptions) -> String {
        let mut query = Query::select();

        query
            .column((Alias::new(DOCUMENT_TABLE), Alias::new("id")))
            .column((Alias::new(DOCUMENT_TABLE), Alias::new("body")))
            .from(Alias::new(DOCUMENT_TABLE));

        self.add_filters(&mut query);

        let order = match options.sort {
            SortOrder::Oldest => Order::Asc,
            SortOrder::Newest => Order::Desc,
        };
        query.order_by((Alias::new(DOCUMENT_TABLE), Alias::new("id")), order);

        if let Some(limit) = options.limit {
            query.limit(limit.min(MAX_ROWS));
        }
        if options.skip > 0 || options.limit.is_some() {
            query.offset(options.skip.min(MAX_ROWS));
        }

        query.to_string(PostgresQueryBuilder)
    }

    /// Build a COUNT query for the same predicate.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();

        query
            .expr(Expr::col(Asterisk).count())
            .from(Alias::new(DOCUMENT_TABLE));

        self.add_filters(&mut query);

        query.to_string(PostgresQueryBuilder)
    }

    /// Collection scope plus every filter clause.
    fn add_filters(&self, query: &mut SelectStatement) {
        query.and_where(
            Expr::col((Alias::new(DOCUMENT_TABLE), Alias::new("collection")))
                .eq(self.collection.as_str()),
        );

        for clause in self.filter.clauses() {
            query.and_where(clause_expr(clause));
        }
    }
}

/// Build a single predicate. Field names are bound as values, never spliced.
///
/// `->>` renders numbers and booleans as text too, so every clause first
/// requires the field to hold a JSON string.
fn clause_expr(clause: &Clause) -> SimpleExpr {
    match clause {
        Clause::Equals { field, value } => Expr::cust_with_values(
            format!(
                "(jsonb_typeof({DOCUMENT_TABLE}.body -> $1) = 'string' \
                 AND ({DOCUMENT_TABLE}.body ->> $1) = $2)"
            ),
            [field.clone(), value.clone()],
        ),
        Clause::ContainsIgnoreCase { field, value } => Expr::cust_with_values(
            format!(
                "(jsonb_typeof({DOCUMENT_TABLE}.body -> $1) = 'string' \
                 AND ({DOCUMENT_TABLE}.body ->> $1) ILIKE $2)"
            ),
            [field.clone(), format!("%{}%", escape_like_wildcards(value))],
        ),
    }
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
