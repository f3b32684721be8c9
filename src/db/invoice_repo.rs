// src/db/invoice_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::billing::{BillingStats, Invoice, InvoiceItem, InvoiceStatus},
};

/// Linha de item já com o amount calculado pelo service (quantity * rate).
#[derive(Debug, Clone)]
pub struct NewInvoiceItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

#[derive(Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    pub async fn list(&self, status: Option<InvoiceStatus>) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE ($1::invoice_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    pub async fn list_items(&self, invoice_id: Uuid) -> Result<Vec<InvoiceItem>, AppError> {
        let items = sqlx::query_as::<_, InvoiceItem>(
            "SELECT * FROM invoice_items WHERE invoice_id = $1 ORDER BY created_at ASC",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    // =========================================================================
    //  ESCRITA (cada mutação de item recalcula os totais na mesma transação)
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_with_items(
        &self,
        contact_name: &str,
        contact_email: &str,
        contact_address: Option<&str>,
        due_date: NaiveDate,
        tax: Decimal,
        notes: Option<&str>,
        terms: Option<&str>,
        items: &[NewInvoiceItem],
    ) -> Result<(Invoice, Vec<InvoiceItem>), AppError> {
        let mut tx = self.pool.begin().await?;

        // O número amigável vem da mesma sequência do display_id
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            WITH seq AS (SELECT nextval('invoice_display_seq') AS n)
            INSERT INTO invoices (
                display_id, number, contact_name, contact_email, contact_address,
                due_date, tax, notes, terms
            )
            SELECT n, 'INV-' || lpad(n::text, 6, '0'), $1, $2, $3, $4, $5, $6, $7
            FROM seq
            RETURNING *
            "#,
        )
        .bind(contact_name)
        .bind(contact_email)
        .bind(contact_address)
        .bind(due_date)
        .bind(tax)
        .bind(notes)
        .bind(terms)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (invoice_id, description, quantity, rate, amount)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(invoice.id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.rate)
            .bind(item.amount)
            .execute(&mut *tx)
            .await?;
        }

        let invoice = self.recalculate_totals(&mut tx, invoice.id).await?;

        let saved_items = sqlx::query_as::<_, InvoiceItem>(
            "SELECT * FROM invoice_items WHERE invoice_id = $1 ORDER BY created_at ASC",
        )
        .bind(invoice.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((invoice, saved_items))
    }

    pub async fn update_header(
        &self,
        id: Uuid,
        contact_name: &str,
        contact_email: &str,
        contact_address: Option<&str>,
        due_date: NaiveDate,
        notes: Option<&str>,
        terms: Option<&str>,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET contact_name = $2, contact_email = $3, contact_address = $4,
                due_date = $5, notes = $6, terms = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(contact_name)
        .bind(contact_email)
        .bind(contact_address)
        .bind(due_date)
        .bind(notes)
        .bind(terms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        // Os itens caem junto pelo ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn add_item(
        &self,
        invoice_id: Uuid,
        item: NewInvoiceItem,
    ) -> Result<(Invoice, InvoiceItem), AppError> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, InvoiceItem>(
            r#"
            INSERT INTO invoice_items (invoice_id, description, quantity, rate, amount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(invoice_id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.rate)
        .bind(item.amount)
        .fetch_one(&mut *tx)
        .await?;

        let invoice = self.recalculate_totals(&mut tx, invoice_id).await?;

        tx.commit().await?;

        Ok((invoice, saved))
    }

    pub async fn update_item(
        &self,
        invoice_id: Uuid,
        item_id: Uuid,
        item: NewInvoiceItem,
    ) -> Result<Option<(Invoice, InvoiceItem)>, AppError> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, InvoiceItem>(
            r#"
            UPDATE invoice_items
            SET description = $3, quantity = $4, rate = $5, amount = $6
            WHERE id = $2 AND invoice_id = $1
            RETURNING *
            "#,
        )
        .bind(invoice_id)
        .bind(item_id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.rate)
        .bind(item.amount)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(saved) = saved else {
            return Ok(None);
        };

        let invoice = self.recalculate_totals(&mut tx, invoice_id).await?;

        tx.commit().await?;

        Ok(Some((invoice, saved)))
    }

    pub async fn delete_item(&self, invoice_id: Uuid, item_id: Uuid) -> Result<Option<Invoice>, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM invoice_items WHERE id = $2 AND invoice_id = $1")
            .bind(invoice_id)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let invoice = self.recalculate_totals(&mut tx, invoice_id).await?;

        tx.commit().await?;

        Ok(Some(invoice))
    }

    // Recalcula e atualiza em UMA única query: subtotal = soma dos amounts,
    // total = subtotal + tax.
    async fn recalculate_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invoice_id: Uuid,
    ) -> Result<Invoice, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET subtotal = sub.s,
                total = sub.s + tax
            FROM (
                SELECT COALESCE(SUM(amount), 0) AS s
                FROM invoice_items
                WHERE invoice_id = $1
            ) AS sub
            WHERE id = $1
            RETURNING invoices.*
            "#,
        )
        .bind(invoice_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(AppError::InvoiceNotFound)?;

        Ok(invoice)
    }

    // =========================================================================
    //  STATUS
    // =========================================================================

    pub async fn set_status(
        &self,
        id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET status = $2,
                paid_at = CASE WHEN $2 = 'PAID'::invoice_status THEN NOW() ELSE paid_at END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Varre faturas pendentes já vencidas e marca como OVERDUE.
    /// Rodada antes de cada listagem e do cálculo dos cards.
    pub async fn mark_overdue_sweep(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET status = 'OVERDUE'
            WHERE status = 'PENDING' AND due_date < CURRENT_DATE
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    // Os quatro StatCards do faturamento
    pub async fn stats(&self) -> Result<BillingStats, AppError> {
        let stats = sqlx::query_as::<_, BillingStats>(
            r#"
            SELECT
                COALESCE(SUM(total) FILTER (WHERE status = 'PAID'), 0) AS total_revenue,
                COALESCE(SUM(total) FILTER (WHERE status = 'PENDING'), 0) AS pending_amount,
                COALESCE(SUM(total) FILTER (WHERE status = 'OVERDUE'), 0) AS overdue_amount,
                COUNT(*) AS invoice_count
            FROM invoices
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
