//! PostgreSQL-backed `NurseRepository` implementation using Diesel ORM.
//!
//! Create and update run the ward and email checks and the write in one
//! transaction. The referenced ward row is read `FOR KEY SHARE` so a
//! concurrent ward delete either waits for this transaction or has already
//! removed the ward, in which case the check fails cleanly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::consistency::{ensure_email_available, ensure_ward_exists};
use crate::domain::ports::{NurseRepository, NurseRepositoryError};
use crate::domain::{EmailAddress, EmployeeId, NurseDraft, NurseId, NurseView, WardId};

use super::diesel_error_mapping::{
    StoreFailure, TxError, WriteContext, diesel_failure, pool_failure,
};
use super::models::{
    NewIssuedEmployeeIdRow, NewNurseRow, NurseRow, NurseUpdate, nurse_view_from_row,
};
use super::pool::DbPool;
use super::schema::{issued_employee_ids, nurses, wards};

/// Diesel-backed implementation of the [`NurseRepository`] port.
#[derive(Clone)]
pub struct DieselNurseRepository {
    pool: DbPool,
}

impl DieselNurseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, AsyncPgConnection>,
        NurseRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| map_failure(pool_failure(err)))
    }
}

fn map_failure(failure: StoreFailure) -> NurseRepositoryError {
    match failure {
        StoreFailure::Connection(message) => NurseRepositoryError::connection(message),
        StoreFailure::Query(message) => NurseRepositoryError::query(message),
        StoreFailure::Violation(violation) => NurseRepositoryError::violation(violation),
    }
}

fn map_tx_error(
    error: TxError,
    nurse_id: Option<NurseId>,
    context: WriteContext<'_>,
) -> NurseRepositoryError {
    match error {
        TxError::Diesel(error) => map_failure(diesel_failure(error, context)),
        TxError::Violation(violation) => NurseRepositoryError::violation(violation),
        TxError::Missing => {
            NurseRepositoryError::not_found(nurse_id.map_or(0, NurseId::as_i32))
        }
        TxError::InvalidRow(message) => NurseRepositoryError::query(message),
    }
}

fn to_view(row: NurseRow, ward_name: Option<String>) -> Result<NurseView, TxError> {
    nurse_view_from_row(row, ward_name).map_err(TxError::InvalidRow)
}

/// Confirm the ward exists, holding a key-share lock on it, and return its name.
async fn lock_ward(conn: &mut AsyncPgConnection, ward_id: WardId) -> Result<String, TxError> {
    let name: Option<String> = wards::table
        .find(ward_id.as_i32())
        .select(wards::name)
        .for_key_share()
        .first(conn)
        .await
        .optional()?;
    ensure_ward_exists(ward_id, name.is_some())?;
    Ok(name.unwrap_or_default())
}

async fn email_owner(
    conn: &mut AsyncPgConnection,
    email: &EmailAddress,
) -> Result<Option<NurseId>, TxError> {
    let owner: Option<i32> = nurses::table
        .filter(nurses::email.eq(email.as_ref()))
        .select(nurses::id)
        .first(conn)
        .await
        .optional()?;
    owner
        .map(|raw| NurseId::new(raw).map_err(|err| TxError::InvalidRow(err.to_string())))
        .transpose()
}

#[async_trait]
impl NurseRepository for DieselNurseRepository {
    async fn list_with_wards(&self) -> Result<Vec<NurseView>, NurseRepositoryError> {
        let mut conn = self.connection().await?;

        let rows: Vec<(NurseRow, Option<String>)> = nurses::table
            .left_join(wards::table)
            .order(nurses::id.asc())
            .select((NurseRow::as_select(), wards::name.nullable()))
            .load(&mut conn)
            .await
            .map_err(|err| map_failure(diesel_failure(err, WriteContext::default())))?;

        rows.into_iter()
            .map(|(row, ward_name)| {
                nurse_view_from_row(row, ward_name).map_err(NurseRepositoryError::query)
            })
            .collect()
    }

    async fn find_by_id(&self, id: NurseId) -> Result<Option<NurseView>, NurseRepositoryError> {
        let mut conn = self.connection().await?;

        let row: Option<(NurseRow, Option<String>)> = nurses::table
            .left_join(wards::table)
            .filter(nurses::id.eq(id.as_i32()))
            .select((NurseRow::as_select(), wards::name.nullable()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(diesel_failure(err, WriteContext::default())))?;

        row.map(|(row, ward_name)| {
            nurse_view_from_row(row, ward_name).map_err(NurseRepositoryError::query)
        })
        .transpose()
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, NurseRepositoryError> {
        let mut conn = self.connection().await?;

        diesel::select(diesel::dsl::exists(
            nurses::table.filter(nurses::email.eq(email.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_failure(diesel_failure(err, WriteContext::default())))
    }

    async fn insert(
        &self,
        draft: &NurseDraft,
        employee_id: &EmployeeId,
        now: DateTime<Utc>,
    ) -> Result<NurseView, NurseRepositoryError> {
        let mut conn = self.connection().await?;
        let context = WriteContext {
            email: Some(&draft.email),
            ward_id: Some(draft.ward_id),
            employee_id: Some(employee_id),
        };

        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                let ward_name = lock_ward(conn, draft.ward_id).await?;
                let owner = email_owner(conn, &draft.email).await?;
                ensure_email_available(&draft.email, owner, None)?;

                diesel::insert_into(issued_employee_ids::table)
                    .values(&NewIssuedEmployeeIdRow {
                        employee_id: employee_id.as_ref(),
                        issued_at: now,
                    })
                    .execute(conn)
                    .await?;

                let row = diesel::insert_into(nurses::table)
                    .values(&NewNurseRow {
                        employee_id: employee_id.as_ref(),
                        first_name: draft.first_name.as_ref(),
                        last_name: draft.last_name.as_ref(),
                        email: draft.email.as_ref(),
                        ward_id: draft.ward_id.as_i32(),
                        created_at: now,
                        modified_at: now,
                    })
                    .returning(NurseRow::as_returning())
                    .get_result(conn)
                    .await?;

                to_view(row, Some(ward_name))
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_tx_error(err, None, context))
    }

    async fn update(
        &self,
        id: NurseId,
        draft: &NurseDraft,
        now: DateTime<Utc>,
    ) -> Result<NurseView, NurseRepositoryError> {
        let mut conn = self.connection().await?;
        let context = WriteContext {
            email: Some(&draft.email),
            ward_id: Some(draft.ward_id),
            employee_id: None,
        };

        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                nurses::table
                    .find(id.as_i32())
                    .select(nurses::id)
                    .for_update()
                    .first::<i32>(conn)
                    .await
                    .optional()?
                    .ok_or(TxError::Missing)?;

                let ward_name = lock_ward(conn, draft.ward_id).await?;
                let owner = email_owner(conn, &draft.email).await?;
                ensure_email_available(&draft.email, owner, Some(id))?;

                let row = diesel::update(nurses::table.find(id.as_i32()))
                    .set(&NurseUpdate {
                        first_name: draft.first_name.as_ref(),
                        last_name: draft.last_name.as_ref(),
                        email: draft.email.as_ref(),
                        ward_id: draft.ward_id.as_i32(),
                        modified_at: now,
                    })
                    .returning(NurseRow::as_returning())
                    .get_result(conn)
                    .await?;

                to_view(row, Some(ward_name))
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_tx_error(err, Some(id), context))
    }

    async fn delete(&self, id: NurseId) -> Result<NurseView, NurseRepositoryError> {
        let mut conn = self.connection().await?;

        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                let row: NurseRow = diesel::delete(nurses::table.find(id.as_i32()))
                    .returning(NurseRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?
                    .ok_or(TxError::Missing)?;

                let ward_name: Option<String> = wards::table
                    .find(row.ward_id)
                    .select(wards::name)
                    .first(conn)
                    .await
                    .optional()?;

                to_view(row, ward_name)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_tx_error(err, Some(id), WriteContext::default()))
    }
}
