pub mod auth;
pub mod billing_service;
pub mod contacts_service;
pub mod documents_service;
pub mod inbox_service;
pub mod invoice_pdf;
pub mod pipeline_service;
pub mod reports_service;
