use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::query_builder::QueryBuilder;

/// Primary-key reads and deletes for one table
///
/// Inserts and updates are column-specific and live with each entity's
/// service; this covers the lookups every entity shares.
pub struct Repository<T> {
    table_name: &'static str,
    /// Display name used in not-found messages, e.g. "Project"
    entity: &'static str,
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str, entity: &'static str, pool: PgPool) -> Self {
        Self {
            table_name,
            entity,
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Start a filtered SELECT over this table
    pub fn query(&self) -> Result<QueryBuilder<T>, DatabaseError> {
        QueryBuilder::new(self.table_name)
    }

    pub async fn select_optional<K>(&self, id: K) -> Result<Option<T>, DatabaseError>
    where
        K: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send,
    {
        self.ensure_table()?;
        let sql = format!("SELECT * FROM \"{}\" WHERE \"id\" = $1", self.table_name);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn select_404<K>(&self, id: K) -> Result<T, DatabaseError>
    where
        K: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send,
    {
        self.select_optional(id)
            .await?
            .ok_or_else(|| self.not_found())
    }

    pub async fn delete_404<K>(&self, id: K) -> Result<(), DatabaseError>
    where
        K: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send,
    {
        self.ensure_table()?;
        let sql = format!("DELETE FROM \"{}\" WHERE \"id\" = $1", self.table_name);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(self.not_found());
        }
        Ok(())
    }

    pub fn not_found(&self) -> DatabaseError {
        DatabaseError::NotFound(format!("{} not found", self.entity))
    }

    fn ensure_table(&self) -> Result<(), DatabaseError> {
        if DatabaseManager::is_valid_identifier(self.table_name) {
            Ok(())
        } else {
            Err(DatabaseError::QueryError(format!("invalid table name '{}'", self.table_name)))
        }
    }
}
