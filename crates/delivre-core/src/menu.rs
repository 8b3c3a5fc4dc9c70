//! Render-ready projection of the catalog.

use serde::Serialize;

use crate::catalog::{find_category, find_restaurant, Category, MenuItem, Restaurant};
use crate::filter::{filter, CategorySelection};
use crate::locale::Language;
use crate::order::{format_price, OrderIntent};

/// A dish as shown on the menu. Recomputed on every language or category
/// change and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Price with two decimals and currency, e.g. `450.00 DA`.
    pub price_label: String,
    pub image_url: Option<String>,
    pub available: bool,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
}

impl DisplayItem {
    /// The order a customer places for this item.
    pub fn order_intent(&self, customer_name: Option<String>) -> OrderIntent {
        OrderIntent {
            dish_name: self.name.clone(),
            restaurant_name: self.restaurant_name.clone(),
            price: self.price,
            customer_name,
        }
    }
}

/// A restaurant or category label in the visitor's language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLabel {
    pub id: String,
    pub name: String,
}

/// Localizes and filters fetched catalog snapshots.
#[derive(Debug, Clone)]
pub struct MenuViewModel {
    currency: String,
}

impl Default for MenuViewModel {
    fn default() -> Self {
        Self::new("DA")
    }
}

impl MenuViewModel {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Project `items` into display items for `lang`, keeping only those
    /// matching `selection`, in input order.
    pub fn project(
        &self,
        items: &[MenuItem],
        restaurants: &[Restaurant],
        categories: &[Category],
        lang: Language,
        selection: &CategorySelection,
    ) -> Vec<DisplayItem> {
        filter(items, selection)
            .into_iter()
            .map(|item| self.project_one(item, restaurants, categories, lang))
            .collect()
    }

    /// Project a single item, regardless of any category selection.
    pub fn project_one(
        &self,
        item: &MenuItem,
        restaurants: &[Restaurant],
        categories: &[Category],
        lang: Language,
    ) -> DisplayItem {
        let restaurant_name = find_restaurant(restaurants, &item.restaurant_id)
            .map(|r| r.name.resolve(lang))
            .unwrap_or_default();
        let category_name = item
            .category_id
            .as_deref()
            .and_then(|id| find_category(categories, id))
            .map(|c| c.name.resolve(lang))
            .filter(|n| !n.is_empty());

        DisplayItem {
            id: item.id.clone(),
            name: item.name.resolve(lang),
            description: item
                .description
                .as_ref()
                .map(|d| d.resolve(lang))
                .filter(|d| !d.is_empty()),
            price: item.price,
            price_label: format!("{} {}", format_price(item.price), self.currency),
            image_url: item.image_url.clone(),
            available: item.available,
            restaurant_id: item.restaurant_id.clone(),
            restaurant_name,
            category_id: item.category_id.clone(),
            category_name,
        }
    }

    pub fn restaurants(&self, restaurants: &[Restaurant], lang: Language) -> Vec<DisplayLabel> {
        restaurants
            .iter()
            .map(|r| DisplayLabel {
                id: r.id.clone(),
                name: r.name.resolve(lang),
            })
            .collect()
    }

    pub fn categories(&self, categories: &[Category], lang: Language) -> Vec<DisplayLabel> {
        categories
            .iter()
            .map(|c| DisplayLabel {
                id: c.id.clone(),
                name: c.name.resolve(lang),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedText;

    fn restaurant() -> Restaurant {
        Restaurant {
            id: "r1".to_string(),
            name: LocalizedText::new(
                "Chez Amar",
                Some("عند عمر".to_string()),
                Some("Chez Amar FR".to_string()),
            ),
            description: None,
            is_active: true,
        }
    }

    fn category() -> Category {
        Category {
            id: "c1".to_string(),
            name: LocalizedText::new("Mains", Some("أطباق رئيسية".to_string()), None),
            display_order: 1,
        }
    }

    fn dish(id: &str, category_id: Option<&str>) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: LocalizedText::new(
                "Couscous",
                Some("كسكس".to_string()),
                Some("Couscous FR".to_string()),
            ),
            description: Some(LocalizedText::english("Semolina with lamb")),
            price: 450.0,
            image_url: Some("https://img/couscous.jpg".to_string()),
            available: true,
            restaurant_id: "r1".to_string(),
            category_id: category_id.map(str::to_string),
        }
    }

    #[test]
    fn test_project_empty() {
        let vm = MenuViewModel::default();
        let out = vm.project(&[], &[restaurant()], &[category()], Language::Arabic, &CategorySelection::All);
        assert!(out.is_empty());
    }

    #[test]
    fn test_project_each_language_distinct() {
        let vm = MenuViewModel::default();
        let items = vec![dish("d1", Some("c1"))];
        let rs = vec![restaurant()];
        let cs = vec![category()];

        let names: Vec<String> = Language::ALL
            .iter()
            .map(|lang| vm.project(&items, &rs, &cs, *lang, &CategorySelection::All)[0].name.clone())
            .collect();
        assert_eq!(names, vec!["Couscous", "كسكس", "Couscous FR"]);

        let en = vm.project(&items, &rs, &cs, Language::English, &CategorySelection::All);
        let ar = vm.project(&items, &rs, &cs, Language::Arabic, &CategorySelection::All);
        let fr = vm.project(&items, &rs, &cs, Language::French, &CategorySelection::All);
        assert_ne!(en[0], ar[0]);
        assert_ne!(ar[0], fr[0]);
        assert_ne!(en[0], fr[0]);
    }

    #[test]
    fn test_project_resolves_related_names() {
        let vm = MenuViewModel::default();
        let items = vec![dish("d1", Some("c1"))];
        let out = vm.project(&items, &[restaurant()], &[category()], Language::French, &CategorySelection::All);
        let item = &out[0];
        assert_eq!(item.restaurant_name, "Chez Amar FR");
        // No French category name: falls back to English.
        assert_eq!(item.category_name.as_deref(), Some("Mains"));
        assert_eq!(item.description.as_deref(), Some("Semolina with lamb"));
        assert_eq!(item.price_label, "450.00 DA");
    }

    #[test]
    fn test_project_filters_and_keeps_order() {
        let vm = MenuViewModel::default();
        let items = vec![dish("d1", Some("c1")), dish("d2", None), dish("d3", Some("c1"))];
        let out = vm.project(
            &items,
            &[restaurant()],
            &[category()],
            Language::English,
            &CategorySelection::Only("c1".to_string()),
        );
        let ids: Vec<&str> = out.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d3"]);
    }

    #[test]
    fn test_project_unknown_relations_degrade() {
        let vm = MenuViewModel::default();
        let mut item = dish("d1", Some("ghost"));
        item.restaurant_id = "missing".to_string();
        item.description = Some(LocalizedText::default());
        let out = vm.project(&[item], &[], &[], Language::English, &CategorySelection::All);
        assert_eq!(out[0].restaurant_name, "");
        assert!(out[0].category_name.is_none());
        assert!(out[0].description.is_none());
    }

    #[test]
    fn test_availability_passes_through() {
        let vm = MenuViewModel::default();
        let mut item = dish("d1", None);
        item.available = false;
        let out = vm.project(&[item], &[restaurant()], &[], Language::English, &CategorySelection::All);
        assert!(!out[0].available);
    }

    #[test]
    fn test_order_intent_from_display_item() {
        let vm = MenuViewModel::default();
        let item = vm.project_one(&dish("d1", None), &[restaurant()], &[], Language::Arabic);
        let intent = item.order_intent(Some("Karim".to_string()));
        assert_eq!(intent.dish_name, "كسكس");
        assert_eq!(intent.restaurant_name, "عند عمر");
        assert_eq!(intent.price, 450.0);
    }
}
