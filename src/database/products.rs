use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Category, Product, ProductDetail, ProductSummary};
use crate::database::DatabaseError;

/// Full scalar field set for a product write. Writes are whole-record
/// replacements: omitted request fields arrive here as their defaults.
#[derive(Debug, Clone, Default)]
pub struct ProductWrite {
    pub name: String,
    pub description: String,
    pub rich_description: String,
    /// `None` keeps the stored image on update. Creation always supplies one.
    pub image: Option<String>,
    pub brand: String,
    pub price: f64,
    pub category_id: Uuid,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
}

/// Outcome of a write whose category gate runs in the same transaction as
/// the row write.
#[derive(Debug)]
pub enum GuardedWrite {
    Written(Product),
    NoCategory,
    NoProduct,
}

pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally restricted to a category set, projected to
    /// id/name/price.
    pub async fn list(
        &self,
        categories: Option<Vec<Uuid>>,
    ) -> Result<Vec<ProductSummary>, DatabaseError> {
        let rows = match categories {
            Some(ids) => {
                sqlx::query_as::<_, ProductSummary>(
                    "SELECT id, name, price FROM products WHERE category_id = ANY($1)",
                )
                .bind(ids)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProductSummary>("SELECT id, name, price FROM products")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DatabaseError> {
        let row = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Single product with its category reference expanded.
    pub async fn find_detail(&self, id: Uuid) -> Result<Option<ProductDetail>, DatabaseError> {
        let Some(product) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, icon, color FROM categories WHERE id = $1",
        )
        .bind(product.category_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(Some(ProductDetail::from_parts(product, category)))
    }

    /// Insert a new product. The category existence gate and the insert
    /// share one transaction.
    pub async fn create(&self, write: ProductWrite) -> Result<GuardedWrite, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let category_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)")
                .bind(write.category_id)
                .fetch_one(&mut *tx)
                .await?;
        if !category_exists {
            return Ok(GuardedWrite::NoCategory);
        }

        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products \
             (id, name, description, rich_description, image, brand, price, category_id, \
              count_in_stock, rating, num_reviews, is_featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&write.name)
        .bind(&write.description)
        .bind(&write.rich_description)
        .bind(write.image.as_deref().unwrap_or_default())
        .bind(&write.brand)
        .bind(write.price)
        .bind(write.category_id)
        .bind(write.count_in_stock)
        .bind(write.rating)
        .bind(write.num_reviews)
        .bind(write.is_featured)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(GuardedWrite::Written(product))
    }

    /// Replace every scalar field of a product. A `None` image keeps the
    /// stored value; the COALESCE makes the retention atomic with the write.
    pub async fn update(&self, id: Uuid, write: ProductWrite) -> Result<GuardedWrite, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let category_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)")
                .bind(write.category_id)
                .fetch_one(&mut *tx)
                .await?;
        if !category_exists {
            return Ok(GuardedWrite::NoCategory);
        }

        let updated = sqlx::query_as::<_, Product>(
            "UPDATE products SET \
             name = $2, description = $3, rich_description = $4, \
             image = COALESCE($5, image), brand = $6, price = $7, category_id = $8, \
             count_in_stock = $9, rating = $10, num_reviews = $11, is_featured = $12 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&write.name)
        .bind(&write.description)
        .bind(&write.rich_description)
        .bind(write.image.as_deref())
        .bind(&write.brand)
        .bind(write.price)
        .bind(write.category_id)
        .bind(write.count_in_stock)
        .bind(write.rating)
        .bind(write.num_reviews)
        .bind(write.is_featured)
        .fetch_optional(&mut *tx)
        .await?;

        match updated {
            Some(product) => {
                tx.commit().await?;
                Ok(GuardedWrite::Written(product))
            }
            None => Ok(GuardedWrite::NoProduct),
        }
    }

    /// Replace the supplementary gallery wholesale, in upload order.
    pub async fn update_images(
        &self,
        id: Uuid,
        images: Vec<String>,
    ) -> Result<Option<Product>, DatabaseError> {
        let row = sqlx::query_as::<_, Product>(
            "UPDATE products SET images = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Json(images))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Featured products, id/name/price projection. A limit of zero means
    /// no explicit cap.
    pub async fn featured(&self, limit: i64) -> Result<Vec<ProductSummary>, DatabaseError> {
        let rows = if limit > 0 {
            sqlx::query_as::<_, ProductSummary>(
                "SELECT id, name, price FROM products WHERE is_featured LIMIT $1",
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, ProductSummary>(
                "SELECT id, name, price FROM products WHERE is_featured",
            )
            .fetch_all(&self.pool)
            .await?
        };
        Ok(rows)
    }
}
