//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! records re-run the domain validators so a row that somehow violates them
//! surfaces as a query error instead of an invalid value.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    EmailAddress, EmployeeId, Nurse, NurseId, NurseView, PersonName, Ward, WardId, WardName,
};

use super::schema::{issued_employee_ids, nurses, wards};

/// Row struct for reading from the wards table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = wards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WardRow {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Insertable struct for creating ward records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wards)]
pub(crate) struct NewWardRow<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Changeset struct for updating ward records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = wards)]
pub(crate) struct WardUpdate<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub modified_at: DateTime<Utc>,
}

/// Row struct for reading from the nurses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = nurses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NurseRow {
    pub id: i32,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub ward_id: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Insertable struct for creating nurse records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = nurses)]
pub(crate) struct NewNurseRow<'a> {
    pub employee_id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub ward_id: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Changeset struct for updating nurse records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = nurses)]
pub(crate) struct NurseUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub ward_id: i32,
    pub modified_at: DateTime<Utc>,
}

/// Insertable struct for the employee id ledger.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = issued_employee_ids)]
pub(crate) struct NewIssuedEmployeeIdRow<'a> {
    pub employee_id: &'a str,
    pub issued_at: DateTime<Utc>,
}

impl TryFrom<WardRow> for Ward {
    type Error = String;

    fn try_from(row: WardRow) -> Result<Self, Self::Error> {
        let invalid = |err: &dyn std::fmt::Display| format!("stored ward {} is invalid: {err}", row.id);
        Ok(Self {
            id: WardId::new(row.id).map_err(|err| invalid(&err))?,
            name: WardName::new(row.name.as_str()).map_err(|err| invalid(&err))?,
            color: row.color.parse().map_err(|err| invalid(&err))?,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

impl TryFrom<NurseRow> for Nurse {
    type Error = String;

    fn try_from(row: NurseRow) -> Result<Self, Self::Error> {
        let invalid =
            |err: &dyn std::fmt::Display| format!("stored nurse {} is invalid: {err}", row.id);
        Ok(Self {
            id: NurseId::new(row.id).map_err(|err| invalid(&err))?,
            employee_id: EmployeeId::new(row.employee_id.as_str()).map_err(|err| invalid(&err))?,
            first_name: PersonName::new(row.first_name.as_str()).map_err(|err| invalid(&err))?,
            last_name: PersonName::new(row.last_name.as_str()).map_err(|err| invalid(&err))?,
            email: EmailAddress::new(row.email.as_str()).map_err(|err| invalid(&err))?,
            ward_id: WardId::new(row.ward_id).map_err(|err| invalid(&err))?,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

/// Build a [`NurseView`] from a nurse row and its left-joined ward name.
pub(crate) fn nurse_view_from_row(
    row: NurseRow,
    ward_name: Option<String>,
) -> Result<NurseView, String> {
    Ok(NurseView {
        nurse: Nurse::try_from(row)?,
        ward_name,
    })
}
