//! Restaurants, categories, and dishes.

use super::Store;
use async_trait::async_trait;
use delivre_core::{
    catalog::{Category, MenuItem, Restaurant},
    error::DelivreError,
    forms::{NewCategory, NewDish, NewRestaurant},
    locale::LocalizedText,
    traits::CatalogRepository,
};
use tracing::info;
use uuid::Uuid;

type RestaurantRow = (
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    bool,
);

type CategoryRow = (String, String, Option<String>, Option<String>, i64);

type DishRow = (
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    f64,
    Option<String>,
    bool,
    String,
    Option<String>,
);

const RESTAURANT_COLUMNS: &str = "id, name, name_ar, name_fr, description, is_active";
const DISH_COLUMNS: &str = "id, name, name_ar, name_fr, description, description_ar, \
     description_fr, price, image_url, is_available, restaurant_id, category_id";

fn restaurant_from_row(row: RestaurantRow) -> Restaurant {
    let (id, name, name_ar, name_fr, description, is_active) = row;
    Restaurant {
        id,
        name: LocalizedText::new(name, name_ar, name_fr),
        description,
        is_active,
    }
}

fn category_from_row(row: CategoryRow) -> Category {
    let (id, name, name_ar, name_fr, display_order) = row;
    Category {
        id,
        name: LocalizedText::new(name, name_ar, name_fr),
        display_order,
    }
}

fn dish_from_row(row: DishRow) -> MenuItem {
    let (
        id,
        name,
        name_ar,
        name_fr,
        description,
        description_ar,
        description_fr,
        price,
        image_url,
        available,
        restaurant_id,
        category_id,
    ) = row;
    let description = if description.is_none() && description_ar.is_none() && description_fr.is_none()
    {
        None
    } else {
        Some(LocalizedText {
            primary: description,
            secondary: description_ar,
            tertiary: description_fr,
        })
    };
    MenuItem {
        id,
        name: LocalizedText::new(name, name_ar, name_fr),
        description,
        price,
        image_url,
        available,
        restaurant_id,
        category_id,
    }
}

fn primary(text: &LocalizedText) -> &str {
    text.primary.as_deref().unwrap_or_default()
}

#[async_trait]
impl CatalogRepository for Store {
    async fn list_restaurants(&self, active_only: bool) -> Result<Vec<Restaurant>, DelivreError> {
        let filter = if active_only { "WHERE is_active = 1" } else { "" };
        let rows: Vec<RestaurantRow> = sqlx::query_as(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants {filter} \
             ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DelivreError::Store(format!("list restaurants failed: {e}")))?;

        Ok(rows.into_iter().map(restaurant_from_row).collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DelivreError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            "SELECT id, name, name_ar, name_fr, display_order FROM categories \
             ORDER BY display_order ASC, rowid ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DelivreError::Store(format!("list categories failed: {e}")))?;

        Ok(rows.into_iter().map(category_from_row).collect())
    }

    async fn list_dishes(&self, available_only: bool) -> Result<Vec<MenuItem>, DelivreError> {
        let filter = if available_only {
            "WHERE is_available = 1"
        } else {
            ""
        };
        let rows: Vec<DishRow> = sqlx::query_as(&format!(
            "SELECT {DISH_COLUMNS} FROM dishes {filter} ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DelivreError::Store(format!("list dishes failed: {e}")))?;

        Ok(rows.into_iter().map(dish_from_row).collect())
    }

    async fn get_dish(&self, id: &str) -> Result<Option<MenuItem>, DelivreError> {
        let row: Option<DishRow> =
            sqlx::query_as(&format!("SELECT {DISH_COLUMNS} FROM dishes WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DelivreError::Store(format!("get dish failed: {e}")))?;

        Ok(row.map(dish_from_row))
    }

    async fn get_restaurant(&self, id: &str) -> Result<Option<Restaurant>, DelivreError> {
        let row: Option<RestaurantRow> = sqlx::query_as(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DelivreError::Store(format!("get restaurant failed: {e}")))?;

        Ok(row.map(restaurant_from_row))
    }

    async fn insert_restaurant(&self, restaurant: &NewRestaurant) -> Result<String, DelivreError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO restaurants (id, name, name_ar, name_fr, description, is_active) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(primary(&restaurant.name))
        .bind(&restaurant.name.secondary)
        .bind(&restaurant.name.tertiary)
        .bind(&restaurant.description)
        .bind(restaurant.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| DelivreError::Store(format!("insert restaurant failed: {e}")))?;

        info!("restaurant added: {id} ({})", primary(&restaurant.name));
        Ok(id)
    }

    async fn insert_category(&self, category: &NewCategory) -> Result<String, DelivreError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO categories (id, name, name_ar, name_fr, display_order) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(primary(&category.name))
        .bind(&category.name.secondary)
        .bind(&category.name.tertiary)
        .bind(category.display_order)
        .execute(&self.pool)
        .await
        .map_err(|e| DelivreError::Store(format!("insert category failed: {e}")))?;

        info!("category added: {id} ({})", primary(&category.name));
        Ok(id)
    }

    async fn insert_dish(&self, dish: &NewDish) -> Result<String, DelivreError> {
        if self.get_restaurant(&dish.restaurant_id).await?.is_none() {
            return Err(DelivreError::Validation(format!(
                "unknown restaurant {}",
                dish.restaurant_id
            )));
        }
        if let Some(category_id) = &dish.category_id {
            let exists: Option<(String,)> =
                sqlx::query_as("SELECT id FROM categories WHERE id = ?")
                    .bind(category_id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| DelivreError::Store(format!("category lookup failed: {e}")))?;
            if exists.is_none() {
                return Err(DelivreError::Validation(format!(
                    "unknown category {category_id}"
                )));
            }
        }

        let description = dish.description.as_ref();
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO dishes (id, restaurant_id, category_id, name, name_ar, name_fr, \
             description, description_ar, description_fr, price, image_url, is_available) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&dish.restaurant_id)
        .bind(&dish.category_id)
        .bind(primary(&dish.name))
        .bind(&dish.name.secondary)
        .bind(&dish.name.tertiary)
        .bind(description.and_then(|d| d.primary.clone()))
        .bind(description.and_then(|d| d.secondary.clone()))
        .bind(description.and_then(|d| d.tertiary.clone()))
        .bind(dish.price)
        .bind(&dish.image_url)
        .bind(dish.available)
        .execute(&self.pool)
        .await
        .map_err(|e| DelivreError::Store(format!("insert dish failed: {e}")))?;

        info!("dish added: {id} ({}) for restaurant {}", primary(&dish.name), dish.restaurant_id);
        Ok(id)
    }
}
