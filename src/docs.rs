// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Contacts ---
        handlers::contacts::list_contacts,
        handlers::contacts::contact_stats,
        handlers::contacts::get_contact,
        handlers::contacts::create_contact,
        handlers::contacts::update_contact,
        handlers::contacts::delete_contact,

        // --- Pipeline ---
        handlers::pipeline::list_pipelines,
        handlers::pipeline::create_pipeline,
        handlers::pipeline::list_stages,
        handlers::pipeline::create_stage,
        handlers::pipeline::list_leads,
        handlers::pipeline::get_lead,
        handlers::pipeline::create_lead,
        handlers::pipeline::update_lead,
        handlers::pipeline::delete_lead,
        handlers::pipeline::move_lead_stage,
        handlers::pipeline::board,

        // --- Inbox ---
        handlers::inbox::list_messages,
        handlers::inbox::get_message,
        handlers::inbox::compose_message,
        handlers::inbox::update_message,
        handlers::inbox::delete_message,
        handlers::inbox::mark_message_read,
        handlers::inbox::list_threads,
        handlers::inbox::inbox_stats,

        // --- Documents ---
        handlers::documents::list_documents,
        handlers::documents::document_stats,
        handlers::documents::get_document,
        handlers::documents::create_document,
        handlers::documents::update_document,
        handlers::documents::delete_document,
        handlers::documents::send_document,
        handlers::documents::view_document,
        handlers::documents::sign_document,
        handlers::documents::expire_document,

        // --- Billing ---
        handlers::billing::list_invoices,
        handlers::billing::billing_stats,
        handlers::billing::get_invoice,
        handlers::billing::create_invoice,
        handlers::billing::update_invoice,
        handlers::billing::delete_invoice,
        handlers::billing::add_invoice_item,
        handlers::billing::update_invoice_item,
        handlers::billing::delete_invoice_item,
        handlers::billing::send_invoice,
        handlers::billing::pay_invoice,
        handlers::billing::invoice_pdf,

        // --- Reports ---
        handlers::reports::report_summary,
        handlers::reports::pipeline_funnel,
        handlers::reports::revenue_trend,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Contacts ---
            models::contacts::ContactStatus,
            models::contacts::Contact,
            models::contacts::ContactStats,
            handlers::contacts::CreateContactPayload,
            handlers::contacts::UpdateContactPayload,

            // --- Pipeline ---
            models::pipeline::StageCategory,
            models::pipeline::Pipeline,
            models::pipeline::PipelineStage,
            models::pipeline::Lead,
            models::pipeline::StageBoardEntry,
            handlers::pipeline::CreatePipelinePayload,
            handlers::pipeline::CreateStagePayload,
            handlers::pipeline::CreateLeadPayload,
            handlers::pipeline::UpdateLeadPayload,
            handlers::pipeline::MoveLeadStagePayload,

            // --- Inbox ---
            models::inbox::MessageChannel,
            models::inbox::MessagePriority,
            models::inbox::Message,
            models::inbox::ThreadSummary,
            models::inbox::InboxStats,
            handlers::inbox::ComposeMessagePayload,
            handlers::inbox::UpdateMessagePayload,

            // --- Documents ---
            models::documents::DocumentKind,
            models::documents::DocumentStatus,
            models::documents::Document,
            models::documents::DocumentStats,
            handlers::documents::CreateDocumentPayload,
            handlers::documents::UpdateDocumentPayload,

            // --- Billing ---
            models::billing::InvoiceStatus,
            models::billing::Invoice,
            models::billing::InvoiceItem,
            models::billing::InvoiceDetail,
            models::billing::BillingStats,
            handlers::billing::InvoiceItemPayload,
            handlers::billing::CreateInvoicePayload,
            handlers::billing::UpdateInvoicePayload,
            handlers::billing::InvoiceDetailWithItem,

            // --- Reports ---
            models::reports::ReportSummary,
            models::reports::StageFunnelEntry,
            models::reports::RevenueByMonth,

            // --- Settings ---
            models::settings::CrmSettings,
            models::settings::UpdateSettingsRequest,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Contacts", description = "Gestão de Contatos"),
        (name = "Pipeline", description = "Funil de Vendas, Leads e Board"),
        (name = "Inbox", description = "Caixa de Entrada Unificada"),
        (name = "Documents", description = "Documentos e Ciclo de Assinatura"),
        (name = "Billing", description = "Faturas e Receita"),
        (name = "Reports", description = "Indicadores e Gráficos Gerenciais"),
        (name = "Settings", description = "Configurações do Workspace")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
