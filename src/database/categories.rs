use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Category;
use crate::database::DatabaseError;

#[derive(Debug, Clone, Default)]
pub struct CategoryWrite {
    pub name: String,
    pub icon: String,
    pub color: String,
}

pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Category>, DatabaseError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, name, icon, color FROM categories")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DatabaseError> {
        let row = sqlx::query_as::<_, Category>(
            "SELECT id, name, icon, color FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn create(&self, write: CategoryWrite) -> Result<Category, DatabaseError> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name, icon, color) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, icon, color",
        )
        .bind(Uuid::new_v4())
        .bind(&write.name)
        .bind(&write.icon)
        .bind(&write.color)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: Uuid,
        write: CategoryWrite,
    ) -> Result<Option<Category>, DatabaseError> {
        let row = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, icon = $3, color = $4 \
             WHERE id = $1 \
             RETURNING id, name, icon, color",
        )
        .bind(id)
        .bind(&write.name)
        .bind(&write.icon)
        .bind(&write.color)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
