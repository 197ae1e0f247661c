//! PostgreSQL-backed `AccountRepository` over the three role tables.
//!
//! Every operation dispatches on the role tag first and touches exactly one
//! table, so per-table email uniqueness is the only uniqueness there is.
//! Alumni reads join in the `experiences` rows ordered by their serial key.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::account::{
    Account, AccountId, Email, Experience, ProfileUpdate, Role, RoleProfile,
};
use crate::domain::ports::{AccountPersistenceError, AccountRepository};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::{
    AccountColumns, AdminRow, AlumnusRow, ExperienceRow, NewExperienceRow, StudentRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{admins, alumni, experiences, students};

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AccountPersistenceError {
    map_pool_error(error, AccountPersistenceError::connection)
}

fn diesel_error(error: DieselError) -> AccountPersistenceError {
    map_diesel_error(
        error,
        AccountPersistenceError::query,
        AccountPersistenceError::connection,
    )
}

/// Insert-path mapping: the per-table UNIQUE email index rejecting a row is
/// a duplicate registration, not an internal failure.
fn insert_error(error: DieselError) -> AccountPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &error {
        return AccountPersistenceError::duplicate(error.to_string());
    }
    diesel_error(error)
}

fn decode_error(error: impl std::fmt::Display) -> AccountPersistenceError {
    AccountPersistenceError::query(format!("stored account failed validation: {error}"))
}

fn admin_to_account(row: AdminRow) -> Result<Account, AccountPersistenceError> {
    let AdminRow {
        id,
        name,
        email,
        password_hash,
        bio,
        avatar_ref,
        created_at,
    } = row;
    AccountColumns {
        id,
        name,
        email,
        password_hash,
        bio,
        avatar_ref,
        created_at,
    }
    .into_account(RoleProfile::Admin)
    .map_err(decode_error)
}

fn student_to_account(row: StudentRow) -> Result<Account, AccountPersistenceError> {
    let StudentRow {
        id,
        name,
        email,
        password_hash,
        bio,
        avatar_ref,
        student_number,
        year,
        department,
        created_at,
    } = row;
    AccountColumns {
        id,
        name,
        email,
        password_hash,
        bio,
        avatar_ref,
        created_at,
    }
    .into_account(RoleProfile::Student {
        student_number,
        year,
        department,
    })
    .map_err(decode_error)
}

fn alumnus_to_account(
    row: AlumnusRow,
    experience: Vec<Experience>,
) -> Result<Account, AccountPersistenceError> {
    let AlumnusRow {
        id,
        name,
        email,
        password_hash,
        bio,
        avatar_ref,
        batch,
        department,
        company,
        designation,
        created_at,
    } = row;
    AccountColumns {
        id,
        name,
        email,
        password_hash,
        bio,
        avatar_ref,
        created_at,
    }
    .into_account(RoleProfile::Alumnus {
        batch,
        department,
        company,
        designation,
        experience,
    })
    .map_err(decode_error)
}

async fn load_experiences(
    conn: &mut AsyncPgConnection,
    alumnus_id: Uuid,
) -> Result<Vec<Experience>, AccountPersistenceError> {
    let rows = experiences::table
        .filter(experiences::alumnus_id.eq(alumnus_id))
        .order(experiences::id.asc())
        .select(ExperienceRow::as_select())
        .load::<ExperienceRow>(conn)
        .await
        .map_err(diesel_error)?;
    Ok(rows.into_iter().map(Experience::from).collect())
}

async fn load_alumnus(
    conn: &mut AsyncPgConnection,
    row: Option<AlumnusRow>,
) -> Result<Option<Account>, AccountPersistenceError> {
    let Some(row) = row else {
        return Ok(None);
    };
    let experience = load_experiences(conn, row.id).await?;
    alumnus_to_account(row, experience).map(Some)
}

/// Partial update applied to the columns shared by every account table.
#[derive(AsChangeset)]
#[diesel(table_name = admins)]
struct AdminChangeset {
    bio: Option<String>,
    avatar_ref: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = students)]
struct StudentChangeset {
    bio: Option<String>,
    avatar_ref: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = alumni)]
struct AlumnusChangeset {
    bio: Option<String>,
    avatar_ref: Option<String>,
    company: Option<String>,
    designation: Option<String>,
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_email(
        &self,
        role: Role,
        email: &Email,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        match role {
            Role::Admin => {
                let row = admins::table
                    .filter(admins::email.eq(email.as_ref()))
                    .select(AdminRow::as_select())
                    .first::<AdminRow>(&mut conn)
                    .await
                    .optional()
                    .map_err(diesel_error)?;
                row.map(admin_to_account).transpose()
            }
            Role::Student => {
                let row = students::table
                    .filter(students::email.eq(email.as_ref()))
                    .select(StudentRow::as_select())
                    .first::<StudentRow>(&mut conn)
                    .await
                    .optional()
                    .map_err(diesel_error)?;
                row.map(student_to_account).transpose()
            }
            Role::Alumnus => {
                let row = alumni::table
                    .filter(alumni::email.eq(email.as_ref()))
                    .select(AlumnusRow::as_select())
                    .first::<AlumnusRow>(&mut conn)
                    .await
                    .optional()
                    .map_err(diesel_error)?;
                load_alumnus(&mut conn, row).await
            }
        }
    }

    async fn find_by_id(
        &self,
        role: Role,
        id: AccountId,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let id = *id.as_uuid();
        match role {
            Role::Admin => {
                let row = admins::table
                    .find(id)
                    .select(AdminRow::as_select())
                    .first::<AdminRow>(&mut conn)
                    .await
                    .optional()
                    .map_err(diesel_error)?;
                row.map(admin_to_account).transpose()
            }
            Role::Student => {
                let row = students::table
                    .find(id)
                    .select(StudentRow::as_select())
                    .first::<StudentRow>(&mut conn)
                    .await
                    .optional()
                    .map_err(diesel_error)?;
                row.map(student_to_account).transpose()
            }
            Role::Alumnus => {
                let row = alumni::table
                    .find(id)
                    .select(AlumnusRow::as_select())
                    .first::<AlumnusRow>(&mut conn)
                    .await
                    .optional()
                    .map_err(diesel_error)?;
                load_alumnus(&mut conn, row).await
            }
        }
    }

    async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let shared = AccountColumns::from_account(account);
        match &account.profile {
            RoleProfile::Admin => {
                let row = AdminRow {
                    id: shared.id,
                    name: shared.name,
                    email: shared.email,
                    password_hash: shared.password_hash,
                    bio: shared.bio,
                    avatar_ref: shared.avatar_ref,
                    created_at: shared.created_at,
                };
                diesel::insert_into(admins::table)
                    .values(&row)
                    .execute(&mut conn)
                    .await
                    .map_err(insert_error)?;
            }
            RoleProfile::Student {
                student_number,
                year,
                department,
            } => {
                let row = StudentRow {
                    id: shared.id,
                    name: shared.name,
                    email: shared.email,
                    password_hash: shared.password_hash,
                    bio: shared.bio,
                    avatar_ref: shared.avatar_ref,
                    student_number: student_number.clone(),
                    year: year.clone(),
                    department: department.clone(),
                    created_at: shared.created_at,
                };
                diesel::insert_into(students::table)
                    .values(&row)
                    .execute(&mut conn)
                    .await
                    .map_err(insert_error)?;
            }
            RoleProfile::Alumnus {
                batch,
                department,
                company,
                designation,
                experience,
            } => {
                let row = AlumnusRow {
                    id: shared.id,
                    name: shared.name,
                    email: shared.email,
                    password_hash: shared.password_hash,
                    bio: shared.bio,
                    avatar_ref: shared.avatar_ref,
                    batch: batch.clone(),
                    department: department.clone(),
                    company: company.clone(),
                    designation: designation.clone(),
                    created_at: shared.created_at,
                };
                diesel::insert_into(alumni::table)
                    .values(&row)
                    .execute(&mut conn)
                    .await
                    .map_err(insert_error)?;
                for entry in experience {
                    let new_row = NewExperienceRow {
                        alumnus_id: shared.id,
                        company: entry.company.clone(),
                        position: entry.position.clone(),
                        start_date: entry.start_date.clone(),
                        end_date: entry.end_date.clone(),
                        description: entry.description.clone(),
                    };
                    diesel::insert_into(experiences::table)
                        .values(&new_row)
                        .execute(&mut conn)
                        .await
                        .map_err(diesel_error)?;
                }
            }
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        role: Role,
        id: AccountId,
        update: ProfileUpdate,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let has_shared = update.bio.is_some() || update.avatar_ref.is_some();
        let has_employment = update.company.is_some() || update.designation.is_some();
        // Employment fields only have columns in the alumni table; for the
        // other roles they are ignored rather than treated as a change.
        let has_changes = match role {
            Role::Alumnus => has_shared || has_employment,
            Role::Admin | Role::Student => has_shared,
        };
        if !has_changes {
            return self.find_by_id(role, id).await;
        }

        {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let uuid = *id.as_uuid();
            let affected = match role {
                Role::Admin => diesel::update(admins::table.find(uuid))
                    .set(AdminChangeset {
                        bio: update.bio,
                        avatar_ref: update.avatar_ref,
                    })
                    .execute(&mut conn)
                    .await
                    .map_err(diesel_error)?,
                Role::Student => diesel::update(students::table.find(uuid))
                    .set(StudentChangeset {
                        bio: update.bio,
                        avatar_ref: update.avatar_ref,
                    })
                    .execute(&mut conn)
                    .await
                    .map_err(diesel_error)?,
                Role::Alumnus => diesel::update(alumni::table.find(uuid))
                    .set(AlumnusChangeset {
                        bio: update.bio,
                        avatar_ref: update.avatar_ref,
                        company: update.company,
                        designation: update.designation,
                    })
                    .execute(&mut conn)
                    .await
                    .map_err(diesel_error)?,
            };
            if affected == 0 {
                return Ok(None);
            }
        }

        self.find_by_id(role, id).await
    }

    async fn push_experience(
        &self,
        id: AccountId,
        experience: Experience,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let new_row = NewExperienceRow {
                alumnus_id: *id.as_uuid(),
                company: experience.company,
                position: experience.position,
                start_date: experience.start_date,
                end_date: experience.end_date,
                description: experience.description,
            };
            let inserted = diesel::insert_into(experiences::table)
                .values(&new_row)
                .execute(&mut conn)
                .await;
            match inserted {
                Ok(_) => {}
                // No such alumnus: the FK rejects the row.
                Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
                    return Ok(None);
                }
                Err(error) => return Err(diesel_error(error)),
            }
        }

        self.find_by_id(Role::Alumnus, id).await
    }
}
