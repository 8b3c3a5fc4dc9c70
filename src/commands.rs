//! CLI subcommands.

use std::sync::Arc;

use anyhow::{bail, Context as _};
use delivre_core::{
    config::Config,
    error::DelivreError,
    forms::{CategoryForm, NewCategory},
    locale::Language,
    menu::MenuViewModel,
    order::{OrderMessage, OrderMessageBuilder},
    shellexpand,
    traits::CatalogRepository,
};
use delivre_store::Store;
use tracing::info;

use crate::api::{self, ApiState};

/// `delivre serve`
pub async fn serve(cfg: &Config) -> anyhow::Result<()> {
    let store = Store::new(&cfg.store).await?;
    let purged = store.purge_expired_sessions().await?;
    if purged > 0 {
        info!("purged {purged} expired sessions");
    }

    let state = ApiState::new(Arc::new(store), cfg)?;
    println!("{} — serving on {}:{}", cfg.delivre.brand, cfg.api.host, cfg.api.port);
    api::serve(&cfg.api.host, cfg.api.port, state).await
}

/// `delivre status`
pub async fn status(config_path: &str, cfg: &Config) -> anyhow::Result<()> {
    println!("{}", config_summary(config_path, cfg));

    let store = Store::new(&cfg.store)
        .await
        .with_context(|| format!("failed to open {}", shellexpand(&cfg.store.db_path)))?;
    let restaurants = store.list_restaurants(false).await?;
    let categories = store.list_categories().await?;
    let dishes = store.list_dishes(false).await?;
    let available = dishes.iter().filter(|d| d.available).count();

    println!("  restaurants: {}", restaurants.len());
    println!("  categories:  {}", categories.len());
    println!("  dishes:      {} ({available} available)", dishes.len());
    Ok(())
}

/// Header block for `status`, with paths as the store resolves them.
fn config_summary(config_path: &str, cfg: &Config) -> String {
    format!(
        "{} — Status\n\n\
         Config: {config_path}\n\
         Database: {}\n\
         Default language: {}\n\
         Order link: https://{}/ -> {}\n",
        cfg.delivre.brand,
        shellexpand(&cfg.store.db_path),
        cfg.delivre.default_language,
        cfg.order.host,
        cfg.order.destinations.join(", "),
    )
}

/// `delivre user-add`
pub async fn user_add(cfg: &Config, email: &str, password: &str, admin: bool) -> anyhow::Result<()> {
    let store = Store::new(&cfg.store).await?;
    let user_id = store.create_user(email, password).await?;
    if admin {
        store.grant_admin(&user_id).await?;
    }
    println!(
        "Created {}user {email} ({user_id})",
        if admin { "admin " } else { "" }
    );
    Ok(())
}

/// `delivre category-add`
pub async fn category_add(
    cfg: &Config,
    name: String,
    name_ar: Option<String>,
    name_fr: Option<String>,
    order: i64,
) -> anyhow::Result<()> {
    let category = NewCategory::try_from(CategoryForm {
        name: Some(name),
        name_ar,
        name_fr,
        display_order: Some(order),
    })?;
    let store = Store::new(&cfg.store).await?;
    let id = store.insert_category(&category).await?;
    println!("Added category {id}");
    Ok(())
}

/// `delivre order-link`
pub async fn order_link(
    cfg: &Config,
    dish_id: &str,
    lang: Option<&str>,
    customer: Option<String>,
) -> anyhow::Result<()> {
    let lang = match lang {
        Some(code) => code.parse::<Language>()?,
        None => cfg.delivre.default_language,
    };
    let store = Store::new(&cfg.store).await?;
    let builder = OrderMessageBuilder::from_config(&cfg.delivre.brand, &cfg.order)?;
    let menu = MenuViewModel::new(cfg.order.currency.clone());

    let message = order_message(&store, &builder, &menu, dish_id, lang, customer).await?;
    println!("{}\n\n{}", message.text, message.uri);
    Ok(())
}

/// Look up a dish and build its order message.
async fn order_message(
    catalog: &dyn CatalogRepository,
    builder: &OrderMessageBuilder,
    menu: &MenuViewModel,
    dish_id: &str,
    lang: Language,
    customer: Option<String>,
) -> anyhow::Result<OrderMessage> {
    let dish = catalog
        .get_dish(dish_id)
        .await?
        .ok_or_else(|| DelivreError::NotFound(format!("dish {dish_id}")))?;
    if !dish.available {
        bail!("dish {dish_id} is not available");
    }
    let restaurants: Vec<_> = catalog
        .get_restaurant(&dish.restaurant_id)
        .await?
        .into_iter()
        .collect();

    let item = menu.project_one(&dish, &restaurants, &[], lang);
    Ok(builder.build(&item.order_intent(customer)))
}
