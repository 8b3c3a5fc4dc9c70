//! Internationalization — localized static strings for the storefront.
//!
//! Catalog data carries its own translations (see `delivre_core::locale`);
//! this module covers the fixed interface copy around it. Uses a simple
//! `t(key, lang)` lookup with English as the fallback.

use delivre_core::locale::Language;
use std::collections::BTreeMap;

/// Every key served by `/api/content`.
pub const KEYS: &[&str] = &[
    "hero",
    "subtitle",
    "order_now",
    "features",
    "feature1",
    "feature1_desc",
    "feature2",
    "feature2_desc",
    "feature3",
    "feature3_desc",
    "menu",
    "all_categories",
    "order",
    "unavailable",
    "loading",
    "no_dishes",
    "load_error_title",
    "load_error",
];

/// Return a localized static string for `key` in the given `lang`.
/// Unknown keys yield `"???"`.
pub fn t(key: &str, lang: Language) -> &'static str {
    use Language::{Arabic, English, French};

    match key {
        // --- Hero ---
        "hero" => match lang {
            Arabic => "أفضل مطاعم بوسعادة",
            French => "Meilleurs restaurants de Bou Saada",
            English => "Best Restaurants in Bou Saada",
        },
        "subtitle" => match lang {
            Arabic => "اطلب طبقك المفضل وسنوصله إليك",
            French => "Commandez votre plat préféré, on vous le livre",
            English => "Order your favorite dish, we'll deliver it",
        },
        "order_now" => match lang {
            Arabic => "اطلب الآن",
            French => "Commander maintenant",
            English => "Order Now",
        },

        // --- Features ---
        "features" => match lang {
            Arabic => "لماذا تختار عمدة ديليفري؟",
            French => "Pourquoi choisir 3omda Delivre?",
            English => "Why choose 3omda Delivre?",
        },
        "feature1" => match lang {
            Arabic => "توصيل سريع",
            French => "Livraison rapide",
            English => "Fast Delivery",
        },
        "feature1_desc" => match lang {
            Arabic => "نصل إليك في أقل من 30 دقيقة",
            French => "Nous arrivons en moins de 30 minutes",
            English => "We arrive in less than 30 minutes",
        },
        "feature2" => match lang {
            Arabic => "طعام طازج",
            French => "Nourriture fraîche",
            English => "Fresh Food",
        },
        "feature2_desc" => match lang {
            Arabic => "جميع الأطباق محضرة طازجة",
            French => "Tous les plats sont fraîchement préparés",
            English => "All dishes are freshly prepared",
        },
        "feature3" => match lang {
            Arabic => "تغطية شاملة",
            French => "Couverture complète",
            English => "Full Coverage",
        },
        "feature3_desc" => match lang {
            Arabic => "نغطي جميع أحياء بوسعادة",
            French => "Nous couvrons tous les quartiers de Bou Saada",
            English => "We cover all neighborhoods in Bou Saada",
        },

        // --- Menu ---
        "menu" => match lang {
            Arabic => "قائمة الطعام",
            French | English => "Menu",
        },
        "all_categories" => match lang {
            Arabic => "الكل",
            French => "Tout",
            English => "All",
        },
        "order" => match lang {
            Arabic => "اطلب الآن",
            French => "Commander",
            English => "Order Now",
        },
        "unavailable" => match lang {
            Arabic => "غير متوفر",
            French => "Non disponible",
            English => "Unavailable",
        },
        "loading" => match lang {
            Arabic => "جاري التحميل...",
            French => "Chargement...",
            English => "Loading...",
        },
        "no_dishes" => match lang {
            Arabic => "لا توجد أطباق متاحة حاليا",
            French => "Aucun plat disponible pour le moment",
            English => "No dishes available right now",
        },
        "load_error_title" => match lang {
            Arabic => "خطأ",
            French => "Erreur",
            English => "Error",
        },
        "load_error" => match lang {
            Arabic => "فشل تحميل البيانات",
            French => "Échec du chargement des données",
            English => "Failed to load data",
        },

        _ => "???",
    }
}

/// All storefront strings for `lang`.
pub fn content(lang: Language) -> BTreeMap<&'static str, &'static str> {
    KEYS.iter().map(|key| (*key, t(key, lang))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_translated() {
        for lang in Language::ALL {
            for key in KEYS {
                let value = t(key, lang);
                assert_ne!(value, "???", "missing {key} for {lang}");
                assert!(!value.is_empty());
            }
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(t("does_not_exist", Language::English), "???");
    }

    #[test]
    fn test_arabic_differs_from_english() {
        for key in KEYS {
            assert_ne!(
                t(key, Language::Arabic),
                t(key, Language::English),
                "{key} not translated to Arabic"
            );
        }
    }

    #[test]
    fn test_content_map() {
        let map = content(Language::French);
        assert_eq!(map.len(), KEYS.len());
        assert_eq!(map["unavailable"], "Non disponible");
        assert_eq!(map["all_categories"], "Tout");
    }
}
