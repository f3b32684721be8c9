pub mod user_repo;
pub use user_repo::UserRepository;
pub mod contact_repo;
pub use contact_repo::ContactRepository;
pub mod pipeline_repo;
pub use pipeline_repo::PipelineRepository;
pub mod message_repo;
pub use message_repo::MessageRepository;
pub mod document_repo;
pub use document_repo::DocumentRepository;
pub mod invoice_repo;
pub use invoice_repo::InvoiceRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
