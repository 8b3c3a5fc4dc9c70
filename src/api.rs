//! HTTP API for the storefront and the admin forms.
//!
//! Public endpoints serve the localized menu and build WhatsApp order links.
//! Admin endpoints sit behind a bearer session checked by the admin gate.


use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use delivre_core::{
    admin::{authorize, Access, DenyReason, Session},
    config::Config,
    error::DelivreError,
    filter::CategorySelection,
    forms::{CategoryForm, DishForm, NewCategory, NewDish, NewRestaurant, RestaurantForm},
    locale::Language,
    menu::MenuViewModel,
    order::OrderMessageBuilder,
    traits::{AdminRegistry, CatalogRepository, SessionStore},
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

type ApiError = (StatusCode, Json<Value>);

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    catalog: Arc<dyn CatalogRepository>,
    sessions: Arc<dyn SessionStore>,
    admins: Arc<dyn AdminRegistry>,
    orders: Arc<OrderMessageBuilder>,
    menu: MenuViewModel,
    default_language: Language,
    include_unavailable: bool,
    uptime: Instant,
}

impl ApiState {
    /// Wire one backend that provides catalog, sessions, and admin registry.
    pub fn new<S>(backend: Arc<S>, config: &Config) -> Result<Self, DelivreError>
    where
        S: CatalogRepository + SessionStore + AdminRegistry + 'static,
    {
        let orders = OrderMessageBuilder::from_config(&config.delivre.brand, &config.order)?;
        Ok(Self {
            catalog: backend.clone(),
            sessions: backend.clone(),
            admins: backend,
            orders: Arc::new(orders),
            menu: MenuViewModel::new(config.order.currency.clone()),
            default_language: config.delivre.default_language,
            include_unavailable: config.menu.include_unavailable,
            uptime: Instant::now(),
        })
    }

    /// Requested language, or the configured default when absent or unsupported.
    fn language(&self, param: Option<&str>) -> Language {
        param
            .and_then(|p| p.parse().ok())
            .unwrap_or(self.default_language)
    }
}

/// Map a core error onto a JSON error response.
fn error_response(e: DelivreError) -> ApiError {
    let status = match &e {
        DelivreError::Validation(_) => StatusCode::BAD_REQUEST,
        DelivreError::Auth(_) => StatusCode::UNAUTHORIZED,
        DelivreError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => {
            error!("request failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({"error": e.to_string()})))
}

fn reject(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({"error": message})))
}

/// Unwrap a JSON body, answering malformed input in the API error shape.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(value) = body.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("invalid request: {e}")})),
        )
    })?;
    Ok(value)
}

fn direction(lang: Language) -> &'static str {
    if lang.is_rtl() {
        "rtl"
    } else {
        "ltr"
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the bearer session and run it through the admin gate.
///
/// A signed-in user who is not an administrator has the session revoked.
async fn require_admin(headers: &HeaderMap, state: &ApiState) -> Result<Session, ApiError> {
    let session = match bearer_token(headers) {
        Some(token) => match state.sessions.session(token).await {
            Ok(session) => session,
            Err(e) => {
                warn!("session lookup failed, denying: {e}");
                None
            }
        },
        None => None,
    };

    match (authorize(session.as_ref(), state.admins.as_ref()).await, session) {
        (Access::Allowed(_), Some(session)) => Ok(session),
        (Access::Denied(DenyReason::NotAdministrator), Some(session)) => {
            warn!("non-admin {} hit an admin endpoint, signing out", session.email);
            if let Err(e) = state.sessions.sign_out(&session.token).await {
                error!("failed to revoke session for {}: {e}", session.email);
            }
            Err(reject(StatusCode::FORBIDDEN, "not authorized"))
        }
        (Access::Denied(DenyReason::RegistryUnavailable), _) => {
            Err(reject(StatusCode::FORBIDDEN, "not authorized"))
        }
        _ => Err(reject(StatusCode::UNAUTHORIZED, "authentication required")),
    }
}

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MenuQuery {
    lang: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderRequest {
    dish_id: String,
    lang: Option<String>,
    customer_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// `GET /api/health` — Liveness with uptime.
async fn health(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime.elapsed().as_secs(),
    }))
}

/// `GET /api/content` — Storefront strings in the requested language.
async fn content(State(state): State<ApiState>, Query(q): Query<LangQuery>) -> Json<Value> {
    let lang = state.language(q.lang.as_deref());
    let languages: Vec<Value> = Language::ALL
        .iter()
        .map(|l| json!({"code": l, "name": l.native_name()}))
        .collect();
    Json(json!({
        "lang": lang,
        "dir": direction(lang),
        "languages": languages,
        "strings": crate::i18n::content(lang),
    }))
}

/// `GET /api/restaurants` — Active restaurants, localized.
async fn restaurants(
    State(state): State<ApiState>,
    Query(q): Query<LangQuery>,
) -> Result<Json<Value>, ApiError> {
    let lang = state.language(q.lang.as_deref());
    let restaurants = state
        .catalog
        .list_restaurants(true)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({
        "lang": lang,
        "restaurants": state.menu.restaurants(&restaurants, lang),
    })))
}

/// `GET /api/categories` — Categories in display order, localized.
async fn categories(
    State(state): State<ApiState>,
    Query(q): Query<LangQuery>,
) -> Result<Json<Value>, ApiError> {
    let lang = state.language(q.lang.as_deref());
    let categories = state.catalog.list_categories().await.map_err(error_response)?;
    Ok(Json(json!({
        "lang": lang,
        "categories": state.menu.categories(&categories, lang),
    })))
}

/// `GET /api/menu` — Projected dishes for a language and optional category.
async fn menu(
    State(state): State<ApiState>,
    Query(q): Query<MenuQuery>,
) -> Result<Json<Value>, ApiError> {
    let lang = state.language(q.lang.as_deref());
    let selection = CategorySelection::from_param(q.category.as_deref());

    let (restaurants, categories, dishes) = tokio::try_join!(
        state.catalog.list_restaurants(false),
        state.catalog.list_categories(),
        state.catalog.list_dishes(!state.include_unavailable),
    )
    .map_err(error_response)?;

    let items = state
        .menu
        .project(&dishes, &restaurants, &categories, lang, &selection);

    let category = match &selection {
        CategorySelection::All => None,
        CategorySelection::Only(id) => Some(id.as_str()),
    };
    Ok(Json(json!({
        "lang": lang,
        "dir": direction(lang),
        "category": category,
        "items": items,
    })))
}

/// `POST /api/orders` — Build the WhatsApp order link for a stored dish.
async fn create_order(
    State(state): State<ApiState>,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let req = json_body(body)?;
    let lang = state.language(req.lang.as_deref());

    let dish = state
        .catalog
        .get_dish(&req.dish_id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| error_response(DelivreError::NotFound(format!("dish {}", req.dish_id))))?;

    if !dish.available {
        return Err(reject(StatusCode::CONFLICT, "dish is not available"));
    }

    let restaurants: Vec<_> = state
        .catalog
        .get_restaurant(&dish.restaurant_id)
        .await
        .map_err(error_response)?
        .into_iter()
        .collect();

    let item = state.menu.project_one(&dish, &restaurants, &[], lang);
    let message = state.orders.build(&item.order_intent(req.customer_name));

    info!("order link built for dish {}", dish.id);
    Ok(Json(json!({
        "text": message.text,
        "uri": message.uri,
    })))
}

/// `POST /api/admin/login` — Password sign-in restricted to administrators.
async fn login(
    State(state): State<ApiState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let req = json_body(body)?;
    let session = state
        .sessions
        .sign_in(&req.email, &req.password)
        .await
        .map_err(error_response)?
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "invalid credentials"))?;

    match authorize(Some(&session), state.admins.as_ref()).await {
        Access::Allowed(user_id) => {
            info!("admin signed in: {}", session.email);
            Ok(Json(json!({
                "token": session.token,
                "user_id": user_id,
                "email": session.email,
            })))
        }
        Access::Denied(reason) => {
            warn!("sign-in denied for {}: {}", session.email, reason.as_str());
            state
                .sessions
                .sign_out(&session.token)
                .await
                .map_err(error_response)?;
            Err(reject(StatusCode::FORBIDDEN, "not authorized"))
        }
    }
}

/// `POST /api/admin/logout` — Revoke the bearer session.
async fn logout(
    headers: HeaderMap,
    State(state): State<ApiState>,
) -> Result<Json<Value>, ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "authentication required"))?;
    state.sessions.sign_out(token).await.map_err(error_response)?;
    Ok(Json(json!({"status": "signed_out"})))
}

/// `GET /api/admin/me` — Who the admin gate thinks the caller is.
async fn me(headers: HeaderMap, State(state): State<ApiState>) -> Result<Json<Value>, ApiError> {
    let session = require_admin(&headers, &state).await?;
    Ok(Json(json!({
        "user_id": session.user_id,
        "email": session.email,
    })))
}

/// `POST /api/admin/restaurants` — Add a restaurant.
async fn add_restaurant(
    headers: HeaderMap,
    State(state): State<ApiState>,
    body: Result<Json<RestaurantForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_admin(&headers, &state).await?;
    let restaurant = NewRestaurant::try_from(json_body(body)?).map_err(error_response)?;
    let id = state
        .catalog
        .insert_restaurant(&restaurant)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(json!({"id": id}))))
}

/// `POST /api/admin/categories` — Add a category.
async fn add_category(
    headers: HeaderMap,
    State(state): State<ApiState>,
    body: Result<Json<CategoryForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_admin(&headers, &state).await?;
    let category = NewCategory::try_from(json_body(body)?).map_err(error_response)?;
    let id = state
        .catalog
        .insert_category(&category)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(json!({"id": id}))))
}

/// `POST /api/admin/dishes` — Add a dish.
async fn add_dish(
    headers: HeaderMap,
    State(state): State<ApiState>,
    body: Result<Json<DishForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_admin(&headers, &state).await?;
    let dish = NewDish::try_from(json_body(body)?).map_err(error_response)?;
    let id = state
        .catalog
        .insert_dish(&dish)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(json!({"id": id}))))
}

/// Build the axum router with shared state.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/content", get(content))
        .route("/api/restaurants", get(restaurants))
        .route("/api/categories", get(categories))
        .route("/api/menu", get(menu))
        .route("/api/orders", post(create_order))
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout))
        .route("/api/admin/me", get(me))
        .route("/api/admin/restaurants", post(add_restaurant))
        .route("/api/admin/categories", post(add_category))
        .route("/api/admin/dishes", post(add_dish))
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024)) // 1 MB max request body
        .with_state(state)
}

/// Start the API server and run until it fails.
pub async fn serve(host: &str, port: u16, state: ApiState) -> anyhow::Result<()> {
    let app = build_router(state);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind to {addr}: {e}"))?;

    info!("API server listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
