use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{PublicUser, User};
use crate::database::DatabaseError;

#[derive(Debug, Clone, Default)]
pub struct UserWrite {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub is_admin: bool,
    pub street: String,
    pub apartment: String,
    pub zip: String,
    pub city: String,
    pub country: String,
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new account. Returns `None` when the email is already taken.
    pub async fn create(&self, write: UserWrite) -> Result<Option<PublicUser>, DatabaseError> {
        let result = sqlx::query_as::<_, PublicUser>(
            "INSERT INTO users \
             (id, name, email, password_hash, phone, is_admin, street, apartment, zip, city, country) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING id, name, email, phone, is_admin, street, apartment, zip, city, country",
        )
        .bind(Uuid::new_v4())
        .bind(&write.name)
        .bind(&write.email)
        .bind(&write.password_hash)
        .bind(&write.phone)
        .bind(write.is_admin)
        .bind(&write.street)
        .bind(&write.apartment)
        .bind(&write.zip)
        .bind(&write.city)
        .bind(&write.country)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PublicUser>, DatabaseError> {
        let row = sqlx::query_as::<_, PublicUser>(
            "SELECT id, name, email, phone, is_admin, street, apartment, zip, city, country \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list(&self) -> Result<Vec<PublicUser>, DatabaseError> {
        let rows = sqlx::query_as::<_, PublicUser>(
            "SELECT id, name, email, phone, is_admin, street, apartment, zip, city, country \
             FROM users",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
