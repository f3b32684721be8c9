// src/services/invoice_pdf.rs

use genpdf::{elements, style, Element};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InvoiceRepository, SettingsRepository},
    models::billing::InvoiceStatus,
};

#[derive(Clone)]
pub struct InvoicePdfService {
    repo: InvoiceRepository,
    settings_repo: SettingsRepository,
}

impl InvoicePdfService {
    pub fn new(repo: InvoiceRepository, settings_repo: SettingsRepository) -> Self {
        Self { repo, settings_repo }
    }

    /// Renderiza a fatura em PDF (o botão de download da tela de faturamento).
    pub async fn generate_invoice_pdf(&self, invoice_id: Uuid) -> Result<Vec<u8>, AppError> {
        // 1. Busca os dados
        let invoice = self
            .repo
            .find_by_id(invoice_id)
            .await?
            .ok_or(AppError::InvoiceNotFound)?;
        let items = self.repo.list_items(invoice_id).await?;
        let settings = self.settings_repo.get().await?;

        // 2. Configura o PDF
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Invoice {}", invoice.number));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        // Se tiver nome da empresa configurado, usa. Senão, usa o padrão.
        let company = settings
            .as_ref()
            .and_then(|s| s.company_name.clone())
            .unwrap_or_else(|| "FlowCRM".to_string());
        doc.push(
            elements::Paragraph::new(company)
                .styled(style::Style::new().bold().with_font_size(18)),
        );

        if let Some(email) = settings.as_ref().and_then(|s| s.email.clone()) {
            doc.push(elements::Paragraph::new(email).styled(style::Style::new().with_font_size(10)));
        }

        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new(format!("INVOICE {}", invoice.number))
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Created: {}",
            invoice.created_at.format("%Y-%m-%d")
        )));
        doc.push(elements::Paragraph::new(format!("Due: {}", invoice.due_date.format("%Y-%m-%d"))));

        doc.push(elements::Break::new(1.0));

        // --- DESTINATÁRIO ---
        doc.push(
            elements::Paragraph::new("Bill to:").styled(style::Style::new().bold().with_font_size(10)),
        );
        doc.push(elements::Paragraph::new(invoice.contact_name.clone()));
        doc.push(elements::Paragraph::new(invoice.contact_email.clone()));
        if let Some(address) = &invoice.contact_address {
            doc.push(elements::Paragraph::new(address.clone()));
        }

        doc.push(elements::Break::new(2.0));

        // --- TABELA DE ITENS ---
        // Pesos das colunas: Descrição (5), Qtd (1), Unitário (2), Total (2)
        let mut table = elements::TableLayout::new(vec![5, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Description").styled(style_bold))
            .element(elements::Paragraph::new("Qty").styled(style_bold))
            .element(elements::Paragraph::new("Rate").styled(style_bold))
            .element(elements::Paragraph::new("Amount").styled(style_bold))
            .push()
            .expect("Table error");

        for item in &items {
            table
                .row()
                .element(elements::Paragraph::new(item.description.clone()))
                .element(elements::Paragraph::new(format!("{:.2}", item.quantity)))
                .element(elements::Paragraph::new(format!("$ {:.2}", item.rate)))
                .element(elements::Paragraph::new(format!("$ {:.2}", item.amount)))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(1.5));

        // --- TOTAIS ---
        let mut subtotal_paragraph =
            elements::Paragraph::new(format!("Subtotal: $ {:.2}", invoice.subtotal));
        subtotal_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(subtotal_paragraph);

        let mut tax_paragraph = elements::Paragraph::new(format!("Tax: $ {:.2}", invoice.tax));
        tax_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(tax_paragraph);

        let mut total_paragraph = elements::Paragraph::new(format!("TOTAL: $ {:.2}", invoice.total));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        if invoice.status == InvoiceStatus::Paid {
            if let Some(paid_at) = invoice.paid_at {
                doc.push(elements::Break::new(1.0));
                doc.push(
                    elements::Paragraph::new(format!("Paid on {}", paid_at.format("%Y-%m-%d")))
                        .styled(style::Style::new().bold()),
                );
            }
        }

        // --- RODAPÉ ---
        if let Some(notes) = &invoice.notes {
            doc.push(elements::Break::new(1.5));
            doc.push(elements::Paragraph::new(notes.clone()).styled(style::Style::new().with_font_size(9)));
        }
        if let Some(terms) = &invoice.terms {
            doc.push(elements::Break::new(1.0));
            doc.push(
                elements::Paragraph::new(terms.clone())
                    .styled(style::Style::new().italic().with_font_size(8)),
            );
        }

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}
