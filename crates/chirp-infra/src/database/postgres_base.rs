use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait,
    QueryFilter, RuntimeErr, SqlErr,
};

use chirp_core::error::RepoError;
use chirp_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
///
/// Repositories share one pool through an `Arc`.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub(crate) fn conn(&self) -> &DbConn {
        &self.db
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(self.conn()).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[ID]) -> Result<Vec<T>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let pk = E::PrimaryKey::iter()
            .next()
            .ok_or_else(|| RepoError::Query("entity has no primary key".to_string()))?
            .into_column();

        let result = E::find()
            .filter(pk.is_in(ids.iter().copied()))
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// Translate a SeaORM error, keeping unique-constraint clashes distinguishable.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            return RepoError::UniqueViolation(constraint_name(&detail));
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            return RepoError::Constraint(detail);
        }
        _ => {}
    }

    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Exec(RuntimeErr::Internal(msg)) | DbErr::Query(RuntimeErr::Internal(msg))
            if msg.contains("duplicate key") =>
        {
            RepoError::UniqueViolation(constraint_name(&msg))
        }
        other => RepoError::Query(other.to_string()),
    }
}

/// Pull `uq_x` out of `... violates unique constraint "uq_x"`; the full text otherwise.
fn constraint_name(detail: &str) -> String {
    detail
        .split('"')
        .nth(1)
        .filter(|name| !name.is_empty())
        .unwrap_or(detail)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_message_maps_to_unique_violation() {
        let err = DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"uq_likes_author_post\"".to_string(),
        ));
        assert!(
            matches!(map_db_err(err), RepoError::UniqueViolation(name) if name == "uq_likes_author_post")
        );
    }

    #[test]
    fn test_other_errors_map_to_query() {
        let err = DbErr::Custom("boom".to_string());
        assert!(matches!(map_db_err(err), RepoError::Query(_)));
    }

    #[test]
    fn test_record_not_updated_maps_to_not_found() {
        assert!(matches!(map_db_err(DbErr::RecordNotUpdated), RepoError::NotFound));
    }
}
