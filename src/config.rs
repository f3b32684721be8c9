// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ContactRepository, DocumentRepository, InvoiceRepository, MessageRepository,
        PipelineRepository, ReportRepository, SettingsRepository, UserRepository,
    },
    services::{
        auth::AuthService, billing_service::BillingService, contacts_service::ContactsService,
        documents_service::DocumentsService, inbox_service::InboxService,
        invoice_pdf::InvoicePdfService, pipeline_service::PipelineService,
        reports_service::ReportsService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub contacts_service: ContactsService,
    pub pipeline_service: PipelineService,
    pub inbox_service: InboxService,
    pub documents_service: DocumentsService,
    pub billing_service: BillingService,
    pub reports_service: ReportsService,
    pub invoice_pdf_service: InvoicePdfService,
    pub settings_repo: SettingsRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let contact_repo = ContactRepository::new(db_pool.clone());
        let pipeline_repo = PipelineRepository::new(db_pool.clone());
        let message_repo = MessageRepository::new(db_pool.clone());
        let document_repo = DocumentRepository::new(db_pool.clone());
        let invoice_repo = InvoiceRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone());
        let contacts_service = ContactsService::new(contact_repo);
        let pipeline_service = PipelineService::new(pipeline_repo);
        let inbox_service = InboxService::new(message_repo);
        let documents_service = DocumentsService::new(document_repo);
        let billing_service = BillingService::new(invoice_repo.clone());
        let reports_service = ReportsService::new(report_repo);
        let invoice_pdf_service = InvoicePdfService::new(invoice_repo, settings_repo.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            contacts_service,
            pipeline_service,
            inbox_service,
            documents_service,
            billing_service,
            reports_service,
            invoice_pdf_service,
            settings_repo,
        })
    }
}
