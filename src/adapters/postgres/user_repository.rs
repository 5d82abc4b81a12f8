//! PostgreSQL implementation of the member repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgRow, FromRow, PgPool, QueryBuilder, Row};

use crate::domain::{
    DomainError, ErrorCode, MemberStatus, MembershipType, PaymentState, Role, SubscriptionWindow,
};
use crate::ports::{InactiveMember, MemberRecord, MemberSummary, MemberUpdate, NewMember,
    UserRepository};

/// Member repository backed by the `users` table.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MemberRow {
    id: i64,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    gender: Option<String>,
    date_of_birth: Option<NaiveDate>,
    role: String,
    status: String,
    membership_type: String,
    membership_price: f64,
    join_date: NaiveDate,
    subscription_start: Option<NaiveDate>,
    subscription_end: Option<NaiveDate>,
    payment_status: String,
    emergency_contact: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for MemberRecord {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(MemberRecord {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            gender: row.gender,
            date_of_birth: row.date_of_birth,
            role: Role::parse(&row.role)?,
            status: MemberStatus::parse(&row.status)?,
            membership_type: MembershipType::parse(&row.membership_type)?,
            membership_price: row.membership_price,
            join_date: row.join_date,
            subscription_start: row.subscription_start,
            subscription_end: row.subscription_end,
            payment_state: PaymentState::parse(&row.payment_status)?,
            emergency_contact: row.emergency_contact,
            address: row.address,
            created_at: row.created_at,
        })
    }
}

const MEMBER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone, gender, \
     date_of_birth, role, status, membership_type, membership_price, join_date, \
     subscription_start, subscription_end, payment_status, emergency_contact, address, created_at";

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => db.constraint() == Some(constraint),
        _ => false,
    }
}

fn summary_from_row(row: &PgRow) -> Result<MemberSummary, DomainError> {
    Ok(MemberSummary {
        id: row.try_get("id").map_err(DomainError::database)?,
        email: row.try_get("email").map_err(DomainError::database)?,
        first_name: row.try_get("first_name").map_err(DomainError::database)?,
        last_name: row.try_get("last_name").map_err(DomainError::database)?,
        phone: row.try_get("phone").map_err(DomainError::database)?,
        status: MemberStatus::parse(row.try_get::<String, _>("status").map_err(DomainError::database)?.as_str())?,
        membership_type: MembershipType::parse(
            row.try_get::<String, _>("membership_type")
                .map_err(DomainError::database)?
                .as_str(),
        )?,
        membership_price: row
            .try_get("membership_price")
            .map_err(DomainError::database)?,
        join_date: row.try_get("join_date").map_err(DomainError::database)?,
        subscription_end: row
            .try_get("subscription_end")
            .map_err(DomainError::database)?,
        payment_state: PaymentState::parse(
            row.try_get::<String, _>("payment_status")
                .map_err(DomainError::database)?
                .as_str(),
        )?,
        total_payments: row
            .try_get("total_payments")
            .map_err(DomainError::database)?,
    })
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, member: &NewMember) -> Result<i64, DomainError> {
        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, first_name, last_name, phone, gender, \
             date_of_birth, role, status, membership_type, membership_price, join_date, \
             subscription_start, subscription_end, payment_status, emergency_contact, address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, CURRENT_DATE, $12, $13, $14, $15, $16) \
             RETURNING id",
        )
        .bind(&member.email)
        .bind(&member.password_hash)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.phone)
        .bind(&member.gender)
        .bind(member.date_of_birth)
        .bind(member.role.as_str())
        .bind(member.status.as_str())
        .bind(member.membership_type.as_str())
        .bind(member.membership_price)
        .bind(member.window.start)
        .bind(member.window.end)
        .bind(member.payment_state.as_str())
        .bind(&member.emergency_contact)
        .bind(&member.address)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row.try_get("id").map_err(DomainError::database),
            Err(e) if is_unique_violation(&e, "users_email_key") => Err(DomainError::new(
                ErrorCode::EmailTaken,
                "Email already registered",
            )),
            Err(e) => Err(DomainError::database(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<MemberRecord>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            MEMBER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.map(MemberRecord::try_from).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MemberRecord>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE id = $1",
            MEMBER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DomainError::database)?;

        row.map(MemberRecord::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<MemberSummary>, DomainError> {
        let rows = sqlx::query(
            "SELECT u.id, u.email, u.first_name, u.last_name, u.phone, u.status, \
             u.membership_type, u.membership_price, u.join_date, u.subscription_end, \
             u.payment_status, COUNT(p.id) AS total_payments \
             FROM users u \
             LEFT JOIN payments p ON p.user_id = u.id \
             GROUP BY u.id \
             ORDER BY u.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.iter().map(summary_from_row).collect()
    }

    async fn update(&self, id: i64, changes: &MemberUpdate) -> Result<(), DomainError> {
        if changes.is_empty() {
            return Err(DomainError::validation("No fields to update"));
        }

        // Compose the SET list only from the fields actually provided.
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut set = builder.separated(", ");
        if let Some(email) = &changes.email {
            set.push("email = ").push_bind_unseparated(email);
        }
        if let Some(hash) = &changes.password_hash {
            set.push("password_hash = ").push_bind_unseparated(hash);
        }
        if let Some(first_name) = &changes.first_name {
            set.push("first_name = ").push_bind_unseparated(first_name);
        }
        if let Some(last_name) = &changes.last_name {
            set.push("last_name = ").push_bind_unseparated(last_name);
        }
        if let Some(phone) = &changes.phone {
            set.push("phone = ").push_bind_unseparated(phone);
        }
        if let Some(gender) = &changes.gender {
            set.push("gender = ").push_bind_unseparated(gender);
        }
        if let Some(dob) = changes.date_of_birth {
            set.push("date_of_birth = ").push_bind_unseparated(dob);
        }
        if let Some(status) = changes.status {
            set.push("status = ").push_bind_unseparated(status.as_str());
        }
        if let Some(mt) = changes.membership_type {
            set.push("membership_type = ")
                .push_bind_unseparated(mt.as_str());
        }
        if let Some(price) = changes.membership_price {
            set.push("membership_price = ").push_bind_unseparated(price);
        }
        if let Some(contact) = &changes.emergency_contact {
            set.push("emergency_contact = ")
                .push_bind_unseparated(contact);
        }
        if let Some(address) = &changes.address {
            set.push("address = ").push_bind_unseparated(address);
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, "users_email_key") {
                    DomainError::new(ErrorCode::EmailTaken, "Email already registered")
                } else {
                    DomainError::database(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DomainError::database)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        Ok(())
    }

    async fn activate_subscription(
        &self,
        id: i64,
        membership_type: MembershipType,
        price: f64,
        window: SubscriptionWindow,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE users SET membership_type = $1, membership_price = $2, \
             subscription_start = $3, subscription_end = $4, payment_status = 'paid', \
             status = 'active' \
             WHERE id = $5",
        )
        .bind(membership_type.as_str())
        .bind(price)
        .bind(window.start)
        .bind(window.end)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(DomainError::database)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        Ok(())
    }

    async fn list_inactive(&self, threshold_days: i64) -> Result<Vec<InactiveMember>, DomainError> {
        let rows = sqlx::query(
            "SELECT u.id, u.email, u.first_name, MAX(a.check_in_time) AS last_check_in \
             FROM users u \
             LEFT JOIN attendance a ON a.user_id = u.id \
             WHERE u.status = 'active' AND u.role = 'member' \
             GROUP BY u.id \
             HAVING MAX(a.check_in_time) IS NULL \
                OR MAX(a.check_in_time) < NOW() - ($1 || ' days')::interval",
        )
        .bind(threshold_days.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(DomainError::database)?;

        rows.iter()
            .map(|row| {
                Ok(InactiveMember {
                    id: row.try_get("id").map_err(DomainError::database)?,
                    email: row.try_get("email").map_err(DomainError::database)?,
                    first_name: row.try_get("first_name").map_err(DomainError::database)?,
                    last_check_in: row
                        .try_get("last_check_in")
                        .map_err(DomainError::database)?,
                })
            })
            .collect()
    }
}
