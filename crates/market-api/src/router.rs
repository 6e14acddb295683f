//! Route definitions for the marketplace HTTP API.
//!
//! Every route is registered together with its [`RouteAccess`]; the
//! resulting [`RouteTable`] backs the access guard that wraps all routes.

use axum::handler::Handler;
use axum::routing::{MethodFilter, on};
use axum::{Router, middleware as axum_middleware};

use market_auth::{RouteAccess, RouteTable};
use market_entity::user::UserRole;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// HTTP verbs the API uses.
#[derive(Debug, Clone, Copy)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    fn filter(self) -> MethodFilter {
        match self {
            Self::Get => MethodFilter::GET,
            Self::Post => MethodFilter::POST,
            Self::Put => MethodFilter::PUT,
            Self::Delete => MethodFilter::DELETE,
        }
    }
}

/// Router under construction plus the access declarations of its routes.
struct ApiRoutes {
    router: Router<AppState>,
    table: RouteTable,
}

impl ApiRoutes {
    fn new() -> Self {
        Self {
            router: Router::new(),
            table: RouteTable::new(),
        }
    }

    fn route<H, T>(mut self, verb: Verb, path: &str, access: RouteAccess, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.table.declare(verb.as_str(), path, access);
        self.router = self.router.route(path, on(verb.filter(), handler));
        self
    }
}

fn sellers_and_admins() -> RouteAccess {
    RouteAccess::roles([UserRole::Seller, UserRole::Admin])
}

fn admins() -> RouteAccess {
    RouteAccess::roles([UserRole::Admin])
}

/// Auth endpoints: register, login
fn auth_routes(routes: ApiRoutes) -> ApiRoutes {
    routes
        .route(
            Verb::Post,
            "/api/auth/register",
            RouteAccess::Public,
            handlers::auth::register,
        )
        .route(
            Verb::Post,
            "/api/auth/login",
            RouteAccess::Public,
            handlers::auth::login,
        )
}

/// User endpoints: own profile, admin listing
fn user_routes(routes: ApiRoutes) -> ApiRoutes {
    routes
        .route(
            Verb::Get,
            "/api/users/profile",
            RouteAccess::Authenticated,
            handlers::user::profile,
        )
        .route(Verb::Get, "/api/users", admins(), handlers::user::list_users)
}

/// Product CRUD, search and the admin view
fn product_routes(routes: ApiRoutes) -> ApiRoutes {
    routes
        .route(
            Verb::Post,
            "/api/products",
            sellers_and_admins(),
            handlers::product::create_product,
        )
        .route(
            Verb::Get,
            "/api/products",
            RouteAccess::Authenticated,
            handlers::product::list_products,
        )
        .route(
            Verb::Get,
            "/api/products/admin",
            admins(),
            handlers::product::admin_list_products,
        )
        .route(
            Verb::Get,
            "/api/products/search",
            RouteAccess::Public,
            handlers::product::search_products,
        )
        .route(
            Verb::Get,
            "/api/products/{id}",
            RouteAccess::Public,
            handlers::product::get_product,
        )
        .route(
            Verb::Put,
            "/api/products/{id}",
            sellers_and_admins(),
            handlers::product::update_product,
        )
        .route(
            Verb::Delete,
            "/api/products/{id}",
            sellers_and_admins(),
            handlers::product::delete_product,
        )
}

/// Health check
fn health_routes(routes: ApiRoutes) -> ApiRoutes {
    routes.route(
        Verb::Get,
        "/api/health",
        RouteAccess::Public,
        handlers::health::health,
    )
}

/// The access declarations of every API route.
pub fn route_table() -> RouteTable {
    declared_routes().table
}

fn declared_routes() -> ApiRoutes {
    let routes = ApiRoutes::new();
    let routes = auth_routes(routes);
    let routes = user_routes(routes);
    let routes = product_routes(routes);
    health_routes(routes)
}

/// Build the API router with the access guard applied to every route.
///
/// The guard in `state` enforces the table produced by [`route_table`],
/// which is built from the same declarations as the routes here.
pub fn build_router(state: AppState) -> Router {
    let ApiRoutes { router, .. } = declared_routes();

    router
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::guard::access_guard,
        ))
        .with_state(state)
}
