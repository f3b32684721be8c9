// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
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

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Define as rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let contacts_routes = Router::new()
        .route(
            "/",
            post(handlers::contacts::create_contact).get(handlers::contacts::list_contacts),
        )
        .route("/stats", get(handlers::contacts::contact_stats))
        .route(
            "/{id}",
            get(handlers::contacts::get_contact)
                .put(handlers::contacts::update_contact)
                .delete(handlers::contacts::delete_contact),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let pipeline_routes = Router::new()
        .route(
            "/pipelines",
            post(handlers::pipeline::create_pipeline).get(handlers::pipeline::list_pipelines),
        )
        .route(
            "/stages",
            post(handlers::pipeline::create_stage).get(handlers::pipeline::list_stages),
        )
        .route(
            "/leads",
            post(handlers::pipeline::create_lead).get(handlers::pipeline::list_leads),
        )
        .route(
            "/leads/{id}",
            get(handlers::pipeline::get_lead)
                .put(handlers::pipeline::update_lead)
                .delete(handlers::pipeline::delete_lead),
        )
        // O persist do drag-and-drop do board
        .route("/leads/{id}/stage", patch(handlers::pipeline::move_lead_stage))
        .route("/board", get(handlers::pipeline::board))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let inbox_routes = Router::new()
        .route(
            "/messages",
            post(handlers::inbox::compose_message).get(handlers::inbox::list_messages),
        )
        .route(
            "/messages/{id}",
            get(handlers::inbox::get_message)
                .put(handlers::inbox::update_message)
                .delete(handlers::inbox::delete_message),
        )
        .route("/messages/{id}/read", post(handlers::inbox::mark_message_read))
        .route("/threads", get(handlers::inbox::list_threads))
        .route("/stats", get(handlers::inbox::inbox_stats))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let documents_routes = Router::new()
        .route(
            "/",
            post(handlers::documents::create_document).get(handlers::documents::list_documents),
        )
        .route("/stats", get(handlers::documents::document_stats))
        .route(
            "/{id}",
            get(handlers::documents::get_document)
                .put(handlers::documents::update_document)
                .delete(handlers::documents::delete_document),
        )
        .route("/{id}/send", post(handlers::documents::send_document))
        .route("/{id}/view", post(handlers::documents::view_document))
        .route("/{id}/sign", post(handlers::documents::sign_document))
        .route("/{id}/expire", post(handlers::documents::expire_document))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let billing_routes = Router::new()
        .route(
            "/invoices",
            post(handlers::billing::create_invoice).get(handlers::billing::list_invoices),
        )
        .route("/stats", get(handlers::billing::billing_stats))
        .route(
            "/invoices/{id}",
            get(handlers::billing::get_invoice)
                .put(handlers::billing::update_invoice)
                .delete(handlers::billing::delete_invoice),
        )
        .route("/invoices/{id}/items", post(handlers::billing::add_invoice_item))
        .route(
            "/invoices/{id}/items/{item_id}",
            put(handlers::billing::update_invoice_item)
                .delete(handlers::billing::delete_invoice_item),
        )
        .route("/invoices/{id}/send", post(handlers::billing::send_invoice))
        .route("/invoices/{id}/pay", post(handlers::billing::pay_invoice))
        .route("/invoices/{id}/pdf", get(handlers::billing::invoice_pdf))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let reports_routes = Router::new()
        .route("/summary", get(handlers::reports::report_summary))
        .route("/pipeline", get(handlers::reports::pipeline_funnel))
        .route("/revenue", get(handlers::reports::revenue_trend))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let settings_routes = Router::new()
        .route(
            "/",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/contacts", contacts_routes)
        .nest("/api/pipeline", pipeline_routes)
        .nest("/api/inbox", inbox_routes)
        .nest("/api/documents", documents_routes)
        .nest("/api/billing", billing_routes)
        .nest("/api/reports", reports_routes)
        .nest("/api/settings", settings_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
