// src/services/billing_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        retry::{self, RetryPolicy},
    },
    db::{invoice_repo::NewInvoiceItem, InvoiceRepository},
    models::billing::{BillingStats, Invoice, InvoiceDetail, InvoiceItem, InvoiceStatus},
};

/// Valor de linha: quantity * rate. Todo item persiste com esse valor,
/// recalculado pelo servidor a cada edição.
pub fn line_amount(quantity: Decimal, rate: Decimal) -> Decimal {
    quantity * rate
}

pub fn compute_subtotal(items: &[NewInvoiceItem]) -> Decimal {
    items.iter().map(|item| item.amount).sum()
}

/// draft -> pending (envio) -> paid (baixa); overdue é marcado pela varredura
/// de vencimento e também pode ser quitado.
pub fn invoice_transition_allowed(current: InvoiceStatus, next: InvoiceStatus) -> bool {
    use InvoiceStatus::*;

    matches!((current, next), (Draft, Pending) | (Pending, Paid) | (Overdue, Paid))
}

/// Linha crua vinda do payload; o service calcula o amount.
#[derive(Debug, Clone)]
pub struct InvoiceItemInput {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
}

impl InvoiceItemInput {
    fn into_new_item(self) -> NewInvoiceItem {
        let amount = line_amount(self.quantity, self.rate);
        NewInvoiceItem {
            description: self.description,
            quantity: self.quantity,
            rate: self.rate,
            amount,
        }
    }
}

#[derive(Clone)]
pub struct BillingService {
    repo: InvoiceRepository,
    retry: RetryPolicy,
}

impl BillingService {
    pub fn new(repo: InvoiceRepository) -> Self {
        Self {
            repo,
            retry: RetryPolicy::default(),
        }
    }

    /// A listagem marca antes as pendentes já vencidas como OVERDUE,
    /// para o filtro e os cards enxergarem o status correto.
    pub async fn list(&self, status: Option<InvoiceStatus>) -> Result<Vec<Invoice>, AppError> {
        self.repo.mark_overdue_sweep().await?;
        retry::with_backoff(self.retry, || self.repo.list(status)).await
    }

    pub async fn get_detail(&self, id: Uuid) -> Result<InvoiceDetail, AppError> {
        let header = retry::with_backoff(self.retry, || self.repo.find_by_id(id))
            .await?
            .ok_or(AppError::InvoiceNotFound)?;
        let items = self.repo.list_items(id).await?;

        Ok(InvoiceDetail { header, items })
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        contact_name: &str,
        contact_email: &str,
        contact_address: Option<&str>,
        due_date: chrono::NaiveDate,
        tax: Decimal,
        notes: Option<&str>,
        terms: Option<&str>,
        items: Vec<InvoiceItemInput>,
    ) -> Result<InvoiceDetail, AppError> {
        // Mesmas checagens do formulário: toda linha precisa de descrição
        if items.is_empty() {
            return Err(self.validation_error("items", "A fatura precisa de pelo menos um item."));
        }
        if items.iter().any(|item| item.description.trim().is_empty()) {
            return Err(self.validation_error("items", "Todos os itens precisam de descrição."));
        }

        let new_items: Vec<NewInvoiceItem> =
            items.into_iter().map(InvoiceItemInput::into_new_item).collect();

        let (header, saved_items) = self
            .repo
            .create_with_items(
                contact_name,
                contact_email,
                contact_address,
                due_date,
                tax,
                notes,
                terms,
                &new_items,
            )
            .await?;

        tracing::info!("✅ Fatura {} criada ({} itens).", header.number, saved_items.len());

        Ok(InvoiceDetail {
            header,
            items: saved_items,
        })
    }

    pub async fn update_header(
        &self,
        id: Uuid,
        contact_name: &str,
        contact_email: &str,
        contact_address: Option<&str>,
        due_date: chrono::NaiveDate,
        notes: Option<&str>,
        terms: Option<&str>,
    ) -> Result<Invoice, AppError> {
        self.repo
            .update_header(id, contact_name, contact_email, contact_address, due_date, notes, terms)
            .await?
            .ok_or(AppError::InvoiceNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::InvoiceNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  ITENS (cada escrita recalcula subtotal e total na mesma transação)
    // =========================================================================

    pub async fn add_item(
        &self,
        invoice_id: Uuid,
        item: InvoiceItemInput,
    ) -> Result<(Invoice, InvoiceItem), AppError> {
        if item.description.trim().is_empty() {
            return Err(self.validation_error("description", "O item precisa de descrição."));
        }

        // Confirma que a fatura existe antes de inserir
        self.repo
            .find_by_id(invoice_id)
            .await?
            .ok_or(AppError::InvoiceNotFound)?;

        self.repo.add_item(invoice_id, item.into_new_item()).await
    }

    pub async fn update_item(
        &self,
        invoice_id: Uuid,
        item_id: Uuid,
        item: InvoiceItemInput,
    ) -> Result<(Invoice, InvoiceItem), AppError> {
        if item.description.trim().is_empty() {
            return Err(self.validation_error("description", "O item precisa de descrição."));
        }

        self.repo
            .update_item(invoice_id, item_id, item.into_new_item())
            .await?
            .ok_or(AppError::InvoiceItemNotFound)
    }

    pub async fn delete_item(&self, invoice_id: Uuid, item_id: Uuid) -> Result<Invoice, AppError> {
        self.repo
            .delete_item(invoice_id, item_id)
            .await?
            .ok_or(AppError::InvoiceItemNotFound)
    }

    // =========================================================================
    //  STATUS
    // =========================================================================

    pub async fn send(&self, id: Uuid) -> Result<Invoice, AppError> {
        self.transition(id, InvoiceStatus::Pending).await
    }

    pub async fn pay(&self, id: Uuid) -> Result<Invoice, AppError> {
        self.transition(id, InvoiceStatus::Paid).await
    }

    async fn transition(&self, id: Uuid, next: InvoiceStatus) -> Result<Invoice, AppError> {
        let invoice = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::InvoiceNotFound)?;

        if !invoice_transition_allowed(invoice.status, next) {
            return Err(AppError::InvalidStatusTransition(format!(
                "Fatura {} não pode ir de {:?} para {:?}.",
                invoice.number, invoice.status, next
            )));
        }

        self.repo
            .set_status(id, next)
            .await?
            .ok_or(AppError::InvoiceNotFound)
    }

    /// Mesma varredura da listagem: os cards precisam enxergar as
    /// pendentes vencidas como OVERDUE.
    pub async fn stats(&self) -> Result<BillingStats, AppError> {
        self.repo.mark_overdue_sweep().await?;
        retry::with_backoff(self.retry, || self.repo.stats()).await
    }

    // Helper para erro de validação fora do derive do validator
    fn validation_error(&self, field: &str, message: &str) -> AppError {
        let mut err = validator::ValidationErrors::new();
        let mut validation_err = validator::ValidationError::new("invalid");
        validation_err.message = Some(message.to_string().into());

        let static_field: &'static str = Box::leak(field.to_string().into_boxed_str());
        err.add(static_field, validation_err);

        AppError::ValidationError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(desc: &str, quantity: i64, rate_cents: i64) -> NewInvoiceItem {
        let quantity = Decimal::from(quantity);
        let rate = Decimal::new(rate_cents, 2);
        NewInvoiceItem {
            description: desc.to_string(),
            quantity,
            rate,
            amount: line_amount(quantity, rate),
        }
    }

    #[test]
    fn amount_is_quantity_times_rate() {
        assert_eq!(
            line_amount(Decimal::from(3), Decimal::new(150_00, 2)),
            Decimal::new(450_00, 2)
        );
        assert_eq!(line_amount(Decimal::ZERO, Decimal::new(99_99, 2)), Decimal::ZERO);
    }

    #[test]
    fn subtotal_recomputes_after_quantity_edit() {
        let mut items = vec![item("Consultoria", 10, 150_00), item("Setup", 1, 500_00)];
        assert_eq!(compute_subtotal(&items), Decimal::new(2_000_00, 2));

        // Edita a quantidade da primeira linha: amount e subtotal acompanham
        items[0].quantity = Decimal::from(4);
        items[0].amount = line_amount(items[0].quantity, items[0].rate);
        assert_eq!(compute_subtotal(&items), Decimal::new(1_100_00, 2));
    }

    #[test]
    fn status_flow_draft_pending_paid() {
        use InvoiceStatus::*;
        assert!(invoice_transition_allowed(Draft, Pending));
        assert!(invoice_transition_allowed(Pending, Paid));
        assert!(invoice_transition_allowed(Overdue, Paid));

        assert!(!invoice_transition_allowed(Draft, Paid));
        assert!(!invoice_transition_allowed(Paid, Pending));
        assert!(!invoice_transition_allowed(Pending, Draft));
    }
}
