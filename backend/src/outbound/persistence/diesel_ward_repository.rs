//! PostgreSQL-backed `WardRepository` implementation using Diesel ORM.
//!
//! Ward deletion locks the ward row before counting its nurses. Nurse writes
//! take a key-share lock on the ward they reference, so a nurse cannot be
//! attached to a ward between the count and the delete.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::consistency::{NURSE_WARD_FK_CONSTRAINT, ensure_no_dependents};
use crate::domain::ports::{WardRepository, WardRepositoryError};
use crate::domain::{ConsistencyViolation, Ward, WardDraft, WardId, WardSummary};

use super::diesel_error_mapping::{
    StoreFailure, TxError, WriteContext, diesel_failure, pool_failure,
};
use super::models::{NewWardRow, WardRow, WardUpdate};
use super::pool::DbPool;
use super::schema::{nurses, wards};

/// Diesel-backed implementation of the [`WardRepository`] port.
#[derive(Clone)]
pub struct DieselWardRepository {
    pool: DbPool,
}

impl DieselWardRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: StoreFailure) -> WardRepositoryError {
    match failure {
        StoreFailure::Connection(message) => WardRepositoryError::connection(message),
        StoreFailure::Query(message) => WardRepositoryError::query(message),
        StoreFailure::Violation(violation) => WardRepositoryError::violation(violation),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> WardRepositoryError {
    map_failure(diesel_failure(error, WriteContext::default()))
}

/// Map a failure from the guarded delete transaction.
///
/// A foreign-key failure here means a nurse still references the ward; the
/// exact count is unknown at that point, so it is reported as one.
fn map_delete_error(error: TxError, id: WardId) -> WardRepositoryError {
    match error {
        TxError::Diesel(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            info,
        )) if info.constraint_name() == Some(NURSE_WARD_FK_CONSTRAINT) => {
            WardRepositoryError::violation(ConsistencyViolation::WardHasNurses {
                ward_id: id.as_i32(),
                count: 1,
            })
        }
        TxError::Diesel(error) => map_diesel_error(error),
        TxError::Violation(violation) => WardRepositoryError::violation(violation),
        TxError::Missing => WardRepositoryError::not_found(id.as_i32()),
        TxError::InvalidRow(message) => WardRepositoryError::query(message),
    }
}

fn row_to_ward(row: WardRow) -> Result<Ward, WardRepositoryError> {
    Ward::try_from(row).map_err(WardRepositoryError::query)
}

#[async_trait]
impl WardRepository for DieselWardRepository {
    async fn list_with_nurse_flags(&self) -> Result<Vec<WardSummary>, WardRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_failure(pool_failure(err)))?;

        // Both reads share one snapshot so a flag never disagrees with the
        // ward list it annotates.
        let (rows, referenced) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let rows: Vec<WardRow> = wards::table
                        .order(wards::id.asc())
                        .select(WardRow::as_select())
                        .load(conn)
                        .await?;
                    let referenced: Vec<i32> = nurses::table
                        .select(nurses::ward_id)
                        .distinct()
                        .load(conn)
                        .await?;
                    Ok((rows, referenced))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let referenced: HashSet<i32> = referenced.into_iter().collect();
        rows.into_iter()
            .map(|row| {
                let has_nurses = referenced.contains(&row.id);
                row_to_ward(row).map(|ward| WardSummary { ward, has_nurses })
            })
            .collect()
    }

    async fn find_by_id(&self, id: WardId) -> Result<Option<Ward>, WardRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_failure(pool_failure(err)))?;

        let row: Option<WardRow> = wards::table
            .find(id.as_i32())
            .select(WardRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_ward).transpose()
    }

    async fn insert(
        &self,
        draft: &WardDraft,
        now: DateTime<Utc>,
    ) -> Result<Ward, WardRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_failure(pool_failure(err)))?;

        let new_row = NewWardRow {
            name: draft.name.as_ref(),
            color: draft.color.as_str(),
            created_at: now,
            modified_at: now,
        };
        let row = diesel::insert_into(wards::table)
            .values(&new_row)
            .returning(WardRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_ward(row)
    }

    async fn update(
        &self,
        id: WardId,
        draft: &WardDraft,
        now: DateTime<Utc>,
    ) -> Result<Ward, WardRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_failure(pool_failure(err)))?;

        let changes = WardUpdate {
            name: draft.name.as_ref(),
            color: draft.color.as_str(),
            modified_at: now,
        };
        let row: Option<WardRow> = diesel::update(wards::table.find(id.as_i32()))
            .set(&changes)
            .returning(WardRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let row = row.ok_or_else(|| WardRepositoryError::not_found(id.as_i32()))?;
        row_to_ward(row)
    }

    async fn delete_unreferenced(&self, id: WardId) -> Result<Ward, WardRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_failure(pool_failure(err)))?;

        let row = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    let row: WardRow = wards::table
                        .find(id.as_i32())
                        .select(WardRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                        .ok_or(TxError::Missing)?;

                    let dependents: i64 = nurses::table
                        .filter(nurses::ward_id.eq(id.as_i32()))
                        .count()
                        .get_result(conn)
                        .await?;
                    ensure_no_dependents(id, dependents)?;

                    diesel::delete(wards::table.find(id.as_i32()))
                        .execute(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_delete_error(err, id))?;

        row_to_ward(row)
    }
}
