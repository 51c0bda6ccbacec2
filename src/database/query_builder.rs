use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres};

use crate::database::manager::{DatabaseError, DatabaseManager};

/// Value bound into an equality filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Text(String),
    Int(i32),
}

/// `column = value` condition; conditions are joined with AND
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: &'static str,
    pub value: FilterValue,
}

/// Ordering term such as `created_at DESC`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub descending: bool,
}

impl OrderBy {
    pub const fn asc(column: &'static str) -> Self {
        Self { column, descending: false }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self { column, descending: true }
    }
}

/// Filtered, ordered SELECT over one table
pub struct QueryBuilder<T> {
    table_name: &'static str,
    conditions: Vec<Condition>,
    order: Vec<OrderBy>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str) -> Result<Self, DatabaseError> {
        if !DatabaseManager::is_valid_identifier(table_name) {
            return Err(DatabaseError::QueryError(format!("invalid table name '{}'", table_name)));
        }
        Ok(Self {
            table_name,
            conditions: Vec::new(),
            order: Vec::new(),
            _phantom: std::marker::PhantomData,
        })
    }

    /// Add `column = value`; `None` leaves the query unfiltered
    pub fn filter(mut self, column: &'static str, value: Option<FilterValue>) -> Result<Self, DatabaseError> {
        if let Some(value) = value {
            ensure_column(column)?;
            self.conditions.push(Condition { column, value });
        }
        Ok(self)
    }

    pub fn order_by(mut self, order: OrderBy) -> Result<Self, DatabaseError> {
        ensure_column(order.column)?;
        self.order.push(order);
        Ok(self)
    }

    pub async fn select_all(self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let mut builder = self.build();
        let rows = builder.build_query_as::<T>().fetch_all(pool).await?;
        Ok(rows)
    }

    /// SQL text with `$n` placeholders
    pub fn sql(&self) -> String {
        self.build().into_sql()
    }

    fn build(&self) -> sqlx::QueryBuilder<'static, Postgres> {
        let mut builder = sqlx::QueryBuilder::new(format!("SELECT * FROM \"{}\"", self.table_name));

        for (i, condition) in self.conditions.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push(format!("\"{}\" = ", condition.column));
            match &condition.value {
                FilterValue::Bool(b) => builder.push_bind(*b),
                FilterValue::Text(s) => builder.push_bind(s.clone()),
                FilterValue::Int(n) => builder.push_bind(*n),
            };
        }

        for (i, order) in self.order.iter().enumerate() {
            builder.push(if i == 0 { " ORDER BY " } else { ", " });
            builder.push(format!(
                "\"{}\" {}",
                order.column,
                if order.descending { "DESC" } else { "ASC" }
            ));
        }

        builder
    }
}

fn ensure_column(column: &str) -> Result<(), DatabaseError> {
    if DatabaseManager::is_valid_identifier(column) {
        Ok(())
    } else {
        Err(DatabaseError::QueryError(format!("invalid column name '{}'", column)))
    }
}
