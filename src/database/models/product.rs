use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::Category;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub rich_description: String,
    /// Absolute URL of the primary image, never a relative path.
    pub image: String,
    /// Supplementary gallery; only ever replaced in full.
    pub images: Json<Vec<String>>,
    pub brand: String,
    pub price: f64,
    #[serde(rename = "category")]
    pub category_id: Uuid,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
    pub date_created: DateTime<Utc>,
}

/// Narrow listing projection: id, name and price only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

/// Single-product view with the category reference expanded to the full
/// record. The category can be absent if it was deleted after the product
/// was written; there is no foreign key backing the reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub image: String,
    pub images: Json<Vec<String>>,
    pub brand: String,
    pub price: f64,
    pub category: Option<Category>,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
    pub date_created: DateTime<Utc>,
}

impl ProductDetail {
    pub fn from_parts(product: Product, category: Option<Category>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            rich_description: product.rich_description,
            image: product.image,
            images: product.images,
            brand: product.brand,
            price: product.price,
            category,
            count_in_stock: product.count_in_stock,
            rating: product.rating,
            num_reviews: product.num_reviews,
            is_featured: product.is_featured,
            date_created: product.date_created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_serializes_camel_case_with_category_reference() {
        let product = Product {
            id: Uuid::nil(),
            name: "Desk Lamp".into(),
            description: "".into(),
            rich_description: "".into(),
            image: "http://localhost:3000/public/uploads/lamp-1.png".into(),
            images: Json(vec!["http://localhost:3000/public/uploads/lamp-2.png".into()]),
            brand: "Lumen".into(),
            price: 39.5,
            category_id: Uuid::nil(),
            count_in_stock: 4,
            rating: 4.5,
            num_reviews: 2,
            is_featured: true,
            date_created: Utc::now(),
        };

        let v = serde_json::to_value(&product).unwrap();
        assert!(v.get("richDescription").is_some());
        assert!(v.get("countInStock").is_some());
        assert!(v.get("category").is_some());
        assert!(v.get("category_id").is_none());
        assert_eq!(v["images"].as_array().unwrap().len(), 1);
    }
}
