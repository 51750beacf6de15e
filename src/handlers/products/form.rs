use std::str::FromStr;

use axum::extract::Multipart;
use uuid::Uuid;

use crate::database::products::ProductWrite;
use crate::error::ApiError;
use crate::storage::ImageStore;

/// Scalar fields of a product multipart form, plus the stored upload when
/// the form carried an `image` file part.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub brand: String,
    pub price: f64,
    pub category: Option<Uuid>,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
    /// Filename of the persisted upload, if one was supplied.
    pub stored_image: Option<String>,
}

impl ProductForm {
    fn set(&mut self, field: &str, value: &str) -> Result<(), ApiError> {
        match field {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            "richDescription" => self.rich_description = value.to_string(),
            "brand" => self.brand = value.to_string(),
            "price" => self.price = parse_field(field, value)?,
            "category" => {
                self.category = Some(
                    Uuid::parse_str(value.trim())
                        .map_err(|_| ApiError::bad_request("Invalid Category"))?,
                )
            }
            "countInStock" => self.count_in_stock = parse_field(field, value)?,
            "rating" => self.rating = parse_field(field, value)?,
            "numReviews" => self.num_reviews = parse_field(field, value)?,
            "isFeatured" => self.is_featured = matches!(value.trim(), "true" | "1"),
            // unknown fields are ignored, matching a form-parsing middleware
            _ => {}
        }
        Ok(())
    }

    /// Finish the form into the repository write. Scalars apply as a full
    /// replacement; `image` is the absolute URL of the stored upload, or
    /// `None` to keep the current one on update.
    pub fn into_write(self, category_id: Uuid, image: Option<String>) -> ProductWrite {
        ProductWrite {
            name: self.name,
            description: self.description,
            rich_description: self.rich_description,
            image,
            brand: self.brand,
            price: self.price,
            category_id,
            count_in_stock: self.count_in_stock,
            rating: self.rating,
            num_reviews: self.num_reviews,
            is_featured: self.is_featured,
        }
    }
}

fn parse_field<T: FromStr>(field: &str, value: &str) -> Result<T, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid value for field '{field}'")))
}

/// Drain a product multipart form. The `image` file part is validated
/// against the MIME allow-list and persisted as it streams past; every
/// other part is read as a scalar field. A disallowed type aborts the
/// request before the file is written.
pub async fn parse_product_form(
    mut multipart: Multipart,
    store: &ImageStore,
) -> Result<ProductForm, ApiError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" && field.file_name().is_some() {
            let original = field.file_name().unwrap_or_default().to_string();
            let mime = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            let filename = store.save(&original, &mime, &bytes).await?;
            form.stored_image = Some(filename);
        } else {
            let value = field.text().await?;
            form.set(&name, &value)?;
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_fields_parse_into_place() {
        let mut form = ProductForm::default();
        form.set("name", "Desk Lamp").unwrap();
        form.set("price", "39.5").unwrap();
        form.set("countInStock", "12").unwrap();
        form.set("isFeatured", "true").unwrap();
        form.set("somethingUnknown", "ignored").unwrap();

        assert_eq!(form.name, "Desk Lamp");
        assert_eq!(form.price, 39.5);
        assert_eq!(form.count_in_stock, 12);
        assert!(form.is_featured);
    }

    #[test]
    fn malformed_numbers_are_client_errors() {
        let mut form = ProductForm::default();
        let err = form.set("price", "not-a-number").unwrap_err();
        assert_eq!(err.status_code(), 400);
        let err = form.set("countInStock", "1.5").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn malformed_category_is_invalid_category() {
        let mut form = ProductForm::default();
        let err = form.set("category", "not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Invalid Category");
    }

    #[test]
    fn into_write_keeps_image_optional() {
        let mut form = ProductForm::default();
        form.set("name", "Desk Lamp").unwrap();
        let category_id = Uuid::new_v4();

        let write = form.into_write(category_id, None);
        assert_eq!(write.category_id, category_id);
        assert!(write.image.is_none());
    }
}
