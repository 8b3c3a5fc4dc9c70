//! Shaping of admin form submissions into insertable records.
//!
//! Forms arrive as raw strings. Shaping trims every field, turns blank
//! optional fields into `None`, and rejects missing required ones before
//! anything reaches the store.

use serde::{Deserialize, Serialize};

use crate::error::DelivreError;
use crate::locale::LocalizedText;

/// Trim, and map blank to `None`.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &str) -> Result<String, DelivreError> {
    clean(value).ok_or_else(|| DelivreError::Validation(format!("{field} is required")))
}

fn localized(
    primary: String,
    secondary: Option<String>,
    tertiary: Option<String>,
) -> LocalizedText {
    LocalizedText::new(primary, clean(secondary), clean(tertiary))
}

/// Raw "add restaurant" form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantForm {
    pub name: Option<String>,
    pub name_ar: Option<String>,
    pub name_fr: Option<String>,
    pub description: Option<String>,
}

/// Raw "add category" form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    pub name: Option<String>,
    pub name_ar: Option<String>,
    pub name_fr: Option<String>,
    pub display_order: Option<i64>,
}

/// A price as submitted: browsers send text, API clients may send numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

/// Raw "add dish" form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishForm {
    pub restaurant_id: Option<String>,
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub name_ar: Option<String>,
    pub name_fr: Option<String>,
    pub description: Option<String>,
    pub description_ar: Option<String>,
    pub description_fr: Option<String>,
    pub price: Option<PriceInput>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRestaurant {
    pub name: LocalizedText,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: LocalizedText,
    pub display_order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDish {
    pub restaurant_id: String,
    pub category_id: Option<String>,
    pub name: LocalizedText,
    pub description: Option<LocalizedText>,
    pub price: f64,
    pub image_url: Option<String>,
    pub available: bool,
}

impl TryFrom<RestaurantForm> for NewRestaurant {
    type Error = DelivreError;

    fn try_from(form: RestaurantForm) -> Result<Self, Self::Error> {
        let name = required(form.name, "name")?;
        Ok(Self {
            name: localized(name, form.name_ar, form.name_fr),
            description: clean(form.description),
            is_active: true,
        })
    }
}

impl TryFrom<CategoryForm> for NewCategory {
    type Error = DelivreError;

    fn try_from(form: CategoryForm) -> Result<Self, Self::Error> {
        let name = required(form.name, "name")?;
        Ok(Self {
            name: localized(name, form.name_ar, form.name_fr),
            display_order: form.display_order.unwrap_or(0),
        })
    }
}

/// Parse a submitted price as a finite, non-negative number.
pub fn parse_price(input: Option<PriceInput>) -> Result<f64, DelivreError> {
    let price = match input {
        Some(PriceInput::Number(n)) => n,
        Some(PriceInput::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Err(DelivreError::Validation("price is required".to_string()));
            }
            s.parse::<f64>()
                .map_err(|_| DelivreError::Validation(format!("price {s:?} is not a number")))?
        }
        None => return Err(DelivreError::Validation("price is required".to_string())),
    };
    if !price.is_finite() || price < 0.0 {
        return Err(DelivreError::Validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(price)
}

impl TryFrom<DishForm> for NewDish {
    type Error = DelivreError;

    fn try_from(form: DishForm) -> Result<Self, Self::Error> {
        let restaurant_id = required(form.restaurant_id, "restaurant_id")?;
        let name = required(form.name, "name")?;
        let price = parse_price(form.price)?;

        let description_ar = clean(form.description_ar);
        let description_fr = clean(form.description_fr);
        let description = match clean(form.description) {
            Some(en) => Some(LocalizedText::new(en, description_ar, description_fr)),
            None if description_ar.is_some() || description_fr.is_some() => Some(LocalizedText {
                primary: None,
                secondary: description_ar,
                tertiary: description_fr,
            }),
            None => None,
        };

        Ok(Self {
            restaurant_id,
            category_id: clean(form.category_id),
            name: localized(name, form.name_ar, form.name_fr),
            description,
            price,
            image_url: clean(form.image_url),
            available: form.is_available.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_restaurant_form_trims_and_nulls() {
        let form = RestaurantForm {
            name: s("  Chez Amar "),
            name_ar: s("   "),
            name_fr: s(" Chez Amar "),
            description: s(""),
        };
        let r = NewRestaurant::try_from(form).unwrap();
        assert_eq!(r.name.primary.as_deref(), Some("Chez Amar"));
        assert!(r.name.secondary.is_none());
        assert_eq!(r.name.tertiary.as_deref(), Some("Chez Amar"));
        assert!(r.description.is_none());
        assert!(r.is_active);
    }

    #[test]
    fn test_restaurant_form_requires_name() {
        let err = NewRestaurant::try_from(RestaurantForm {
            name: s("  "),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, DelivreError::Validation(_)));
    }

    #[test]
    fn test_dish_form_shapes_fields() {
        let form = DishForm {
            restaurant_id: s("r1"),
            category_id: s(""),
            name: s("Couscous"),
            name_ar: s("كسكس"),
            price: Some(PriceInput::Text(" 450 ".to_string())),
            image_url: s("  "),
            ..Default::default()
        };
        let dish = NewDish::try_from(form).unwrap();
        assert_eq!(dish.restaurant_id, "r1");
        assert!(dish.category_id.is_none());
        assert_eq!(dish.price, 450.0);
        assert!(dish.image_url.is_none());
        assert!(dish.description.is_none());
        assert!(dish.available);
        assert_eq!(dish.name.secondary.as_deref(), Some("كسكس"));
    }

    #[test]
    fn test_dish_form_translated_description_only() {
        let form = DishForm {
            restaurant_id: s("r1"),
            name: s("Chorba"),
            description_fr: s("Soupe"),
            price: Some(PriceInput::Number(200.0)),
            ..Default::default()
        };
        let dish = NewDish::try_from(form).unwrap();
        let desc = dish.description.unwrap();
        assert!(desc.primary.is_none());
        assert_eq!(desc.tertiary.as_deref(), Some("Soupe"));
    }

    #[test]
    fn test_dish_form_requires_restaurant_and_price() {
        let no_restaurant = DishForm {
            name: s("Chorba"),
            price: Some(PriceInput::Number(1.0)),
            ..Default::default()
        };
        assert!(NewDish::try_from(no_restaurant).is_err());

        let no_price = DishForm {
            restaurant_id: s("r1"),
            name: s("Chorba"),
            ..Default::default()
        };
        assert!(NewDish::try_from(no_price).is_err());
    }

    #[test]
    fn test_parse_price_rejects_bad_values() {
        assert!(parse_price(Some(PriceInput::Text("abc".to_string()))).is_err());
        assert!(parse_price(Some(PriceInput::Text("-1".to_string()))).is_err());
        assert!(parse_price(Some(PriceInput::Text("inf".to_string()))).is_err());
        assert!(parse_price(Some(PriceInput::Number(f64::NAN))).is_err());
        assert_eq!(parse_price(Some(PriceInput::Text("12.5".to_string()))).unwrap(), 12.5);
        assert_eq!(parse_price(Some(PriceInput::Number(0.0))).unwrap(), 0.0);
    }

    #[test]
    fn test_dish_form_from_json() {
        let json = r#"{"restaurant_id":"r1","name":"Tajine","price":"800","is_available":false}"#;
        let form: DishForm = serde_json::from_str(json).unwrap();
        let dish = NewDish::try_from(form).unwrap();
        assert_eq!(dish.price, 800.0);
        assert!(!dish.available);

        let json = r#"{"restaurant_id":"r1","name":"Tajine","price":800}"#;
        let form: DishForm = serde_json::from_str(json).unwrap();
        assert_eq!(NewDish::try_from(form).unwrap().price, 800.0);
    }

    #[test]
    fn test_category_form_default_order() {
        let c = NewCategory::try_from(CategoryForm {
            name: s("Desserts"),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(c.display_order, 0);
        assert_eq!(c.name.primary.as_deref(), Some("Desserts"));
    }
}
