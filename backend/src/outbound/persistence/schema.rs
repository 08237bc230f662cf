//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Organisational units nurses are grouped under.
    wards (id) {
        id -> Int4,
        /// Trimmed display name (max 255 characters).
        name -> Varchar,
        /// One of `Red`, `Green`, `Blue`, `Yellow` (CHECK constrained).
        color -> Varchar,
        created_at -> Timestamptz,
        modified_at -> Timestamptz,
    }
}

diesel::table! {
    /// Staff records, each assigned to exactly one ward.
    nurses (id) {
        id -> Int4,
        /// Opaque 10-character token, unique and immutable.
        employee_id -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Unique across all nurses, compared verbatim.
        email -> Varchar,
        /// References `wards.id` with `ON DELETE RESTRICT`.
        ward_id -> Int4,
        created_at -> Timestamptz,
        modified_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only ledger of every employee id ever issued.
    issued_employee_ids (employee_id) {
        employee_id -> Varchar,
        issued_at -> Timestamptz,
    }
}

diesel::joinable!(nurses -> wards (ward_id));

diesel::allow_tables_to_appear_in_same_query!(issued_employee_ids, nurses, wards);
