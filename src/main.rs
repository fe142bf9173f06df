//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/roles", get(handlers::auth::get_my_roles))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let inventory_routes = Router::new()
        .route("/fabrics"
               ,post(handlers::inventory::create_fabric)
               .get(handlers::inventory::list_fabrics)
        )
        .route("/fabrics/{id}"
               ,delete(handlers::inventory::delete_fabric)
        )
        .route("/fabrics/{id}/issue"
               ,post(handlers::inventory::issue_fabric)
        )
        .route("/fabrics/{id}/return"
               ,post(handlers::inventory::return_fabric)
        )
        .route("/fabrics/{id}/stock-entry"
               ,post(handlers::inventory::add_stock)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let job_routes = Router::new()
        .route("/"
               ,post(handlers::jobs::create_job)
               .get(handlers::jobs::list_jobs)
        )
        .route("/{id}"
               ,get(handlers::jobs::get_job)
               .put(handlers::jobs::update_job)
               .delete(handlers::jobs::delete_job)
        )
        .route("/{id}/advance"
               ,post(handlers::jobs::advance_stage)
        )
        .route("/{id}/fabrics"
               ,post(handlers::jobs::add_job_fabric)
               .get(handlers::jobs::list_job_fabrics)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let report_routes = Router::new()
        .route("/stock-movements"
               ,get(handlers::reports::list_stock_movements)
        )
        .route("/stock-movements/export"
               ,get(handlers::reports::export_stock_movements)
        )
        .route("/stock-movements/{id}"
               ,delete(handlers::reports::delete_stock_movement)
        )
        .route("/production"
               ,get(handlers::reports::list_production_logs)
        )
        .route("/production/export"
               ,get(handlers::reports::export_production_logs)
        )
        .route("/production/{id}"
               ,delete(handlers::reports::delete_production_log)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/recent-movements", get(handlers::dashboard::recent_movements))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/users", user_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/jobs", job_routes)
        .nest("/api/reports", report_routes)
        .nest("/api/dashboard", dashboard_routes)
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
