use crate::{
    admin::Session,
    catalog::{Category, MenuItem, Restaurant},
    error::DelivreError,
    forms::{NewCategory, NewDish, NewRestaurant},
};
use async_trait::async_trait;

/// Catalog storage — where restaurants, categories, and dishes live.
///
/// Reads return plain snapshots; the menu projection never queries.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Restaurants, newest first.
    async fn list_restaurants(&self, active_only: bool) -> Result<Vec<Restaurant>, DelivreError>;

    /// Categories in display order.
    async fn list_categories(&self) -> Result<Vec<Category>, DelivreError>;

    /// Dishes, newest first.
    async fn list_dishes(&self, available_only: bool) -> Result<Vec<MenuItem>, DelivreError>;

    async fn get_dish(&self, id: &str) -> Result<Option<MenuItem>, DelivreError>;

    async fn get_restaurant(&self, id: &str) -> Result<Option<Restaurant>, DelivreError>;

    /// Insert a restaurant and return its id.
    async fn insert_restaurant(&self, restaurant: &NewRestaurant) -> Result<String, DelivreError>;

    /// Insert a category and return its id.
    async fn insert_category(&self, category: &NewCategory) -> Result<String, DelivreError>;

    /// Insert a dish and return its id.
    async fn insert_dish(&self, dish: &NewDish) -> Result<String, DelivreError>;
}

/// Administrator registry — which user identities may write the catalog.
#[async_trait]
pub trait AdminRegistry: Send + Sync {
    async fn is_admin(&self, user_id: &str) -> Result<bool, DelivreError>;
}

/// Password sign-in and bearer-token sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns `None` when the credentials do not match.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>, DelivreError>;

    /// Look up a live (unexpired) session by token.
    async fn session(&self, token: &str) -> Result<Option<Session>, DelivreError>;

    async fn sign_out(&self, token: &str) -> Result<(), DelivreError>;
}
