//! Category-based narrowing of the menu.

use serde::{Deserialize, Serialize};

use crate::catalog::MenuItem;

/// Which category the visitor selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategorySelection {
    /// No filter: show every item.
    #[default]
    All,
    /// Only items whose category is this id.
    Only(String),
}

impl CategorySelection {
    /// Build from an optional query parameter. A missing or blank value
    /// means no filter.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some(id) if !id.is_empty() => Self::Only(id.to_string()),
            _ => Self::All,
        }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => item.category_id.as_deref() == Some(id.as_str()),
        }
    }
}

/// Keep the items matching `selection`, in their original order.
pub fn filter<'a>(items: &'a [MenuItem], selection: &CategorySelection) -> Vec<&'a MenuItem> {
    items.iter().filter(|item| selection.matches(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedText;

    fn item(id: &str, category: Option<&str>) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: LocalizedText::english(id),
            description: None,
            price: 100.0,
            image_url: None,
            available: true,
            restaurant_id: "r1".to_string(),
            category_id: category.map(str::to_string),
        }
    }

    fn ids(items: &[&MenuItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_all_returns_input_unchanged() {
        let items = vec![item("a", Some("c1")), item("b", None), item("c", Some("c2"))];
        let out = filter(&items, &CategorySelection::All);
        assert_eq!(ids(&out), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_only_keeps_matching_in_order() {
        let items = vec![
            item("a", Some("c1")),
            item("b", Some("c2")),
            item("c", Some("c1")),
            item("d", None),
        ];
        let out = filter(&items, &CategorySelection::Only("c1".to_string()));
        assert_eq!(ids(&out), vec!["a", "c"]);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let items = vec![item("a", Some("c1")), item("b", None)];
        let out = filter(&items, &CategorySelection::Only("nope".to_string()));
        assert!(out.is_empty());
    }

    #[test]
    fn test_uncategorized_never_matches_concrete_id() {
        let items = vec![item("a", None)];
        assert!(filter(&items, &CategorySelection::Only(String::new())).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = vec![item("a", Some("c1")), item("b", Some("c2")), item("c", Some("c1"))];
        let sel = CategorySelection::Only("c1".to_string());
        let once: Vec<MenuItem> = filter(&items, &sel).into_iter().cloned().collect();
        let twice = filter(&once, &sel);
        assert_eq!(ids(&twice), vec!["a", "c"]);
    }

    #[test]
    fn test_from_param() {
        assert_eq!(CategorySelection::from_param(None), CategorySelection::All);
        assert_eq!(CategorySelection::from_param(Some("  ")), CategorySelection::All);
        assert_eq!(
            CategorySelection::from_param(Some("c9")),
            CategorySelection::Only("c9".to_string())
        );
    }
}
