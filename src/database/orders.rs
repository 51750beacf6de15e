use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Order, OrderItemDetail, OrderSummary, ProductSummary};
use crate::database::DatabaseError;

#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default)]
pub struct OrderWrite {
    pub items: Vec<OrderLine>,
    pub shipping_address1: String,
    pub shipping_address2: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
}

/// Outcome of an order insert. Unit prices are resolved inside the insert
/// transaction, so a vanished product aborts the whole order.
#[derive(Debug)]
pub enum OrderCreate {
    Written(Order),
    NoProduct(Uuid),
}

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        write: OrderWrite,
    ) -> Result<OrderCreate, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Resolve unit prices server-side at creation time
        let mut priced_lines = Vec::with_capacity(write.items.len());
        let mut total = 0.0_f64;
        for line in &write.items {
            let price: Option<f64> = sqlx::query_scalar("SELECT price FROM products WHERE id = $1")
                .bind(line.product_id)
                .fetch_optional(&mut *tx)
                .await?;
            let Some(price) = price else {
                return Ok(OrderCreate::NoProduct(line.product_id));
            };
            total += price * f64::from(line.quantity);
            priced_lines.push((line, price));
        }

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders \
             (id, user_id, status, total_price, shipping_address1, shipping_address2, \
              city, zip, country, phone) \
             VALUES ($1, $2, 'Pending', $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(total)
        .bind(&write.shipping_address1)
        .bind(&write.shipping_address2)
        .bind(&write.city)
        .bind(&write.zip)
        .bind(&write.country)
        .bind(&write.phone)
        .fetch_one(&mut *tx)
        .await?;

        for (line, price) in priced_lines {
            sqlx::query(
                "INSERT INTO order_items (id, order_id, product_id, quantity, unit_price) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(Uuid::new_v4())
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(OrderCreate::Written(order))
    }

    /// Newest orders first, with the buyer's name joined in.
    pub async fn list(&self) -> Result<Vec<OrderSummary>, DatabaseError> {
        let rows = sqlx::query_as::<_, OrderSummary>(
            "SELECT o.id, u.name AS user_name, o.status, o.total_price, o.date_ordered \
             FROM orders o JOIN users u ON u.id = o.user_id \
             ORDER BY o.date_ordered DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_detail(
        &self,
        id: Uuid,
    ) -> Result<Option<(Order, Vec<OrderItemDetail>)>, DatabaseError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(order) = order else {
            return Ok(None);
        };

        let rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT i.quantity, i.unit_price, p.id AS product_id, p.name, p.price \
             FROM order_items i LEFT JOIN products p ON p.id = i.product_id \
             WHERE i.order_id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let items = rows.into_iter().map(OrderItemDetail::from).collect();
        Ok(Some((order, items)))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<Order>, DatabaseError> {
        let row = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, DatabaseError> {
        let rows = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY date_ordered DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    quantity: i32,
    unit_price: f64,
    product_id: Option<Uuid>,
    name: Option<String>,
    price: Option<f64>,
}

impl From<OrderItemRow> for OrderItemDetail {
    fn from(row: OrderItemRow) -> Self {
        let product = match (row.product_id, row.name, row.price) {
            (Some(id), Some(name), Some(price)) => Some(ProductSummary { id, name, price }),
            _ => None,
        };
        Self {
            quantity: row.quantity,
            unit_price: row.unit_price,
            product,
        }
    }
}
