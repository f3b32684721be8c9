// src/db/report_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::reports::{RevenueByMonth, StageFunnelEntry},
};

// Contagens cruas que alimentam o resumo de relatórios
#[derive(Debug, sqlx::FromRow)]
pub struct LeadCounts {
    pub total: i64,
    pub won: i64,
}

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn lead_counts(&self) -> Result<LeadCounts, AppError> {
        let counts = sqlx::query_as::<_, LeadCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE s.category = 'WON') AS won
            FROM leads l
            JOIN pipeline_stages s ON l.stage_id = s.id
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Receita realizada: soma do total das faturas pagas.
    pub async fn paid_revenue(&self) -> Result<Decimal, AppError> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total), 0) FROM invoices WHERE status = 'PAID'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    // A série do gráfico de funil: leads por etapa, na ordem do funil
    pub async fn stage_funnel(&self) -> Result<Vec<StageFunnelEntry>, AppError> {
        let entries = sqlx::query_as::<_, StageFunnelEntry>(
            r#"
            SELECT s.key, s.name, s.position, COUNT(l.id) AS lead_count
            FROM pipeline_stages s
            LEFT JOIN leads l ON l.stage_id = s.id
            GROUP BY s.key, s.name, s.position
            ORDER BY s.position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    // A série do gráfico de tendência: receita paga agrupada por mês
    pub async fn revenue_by_month(&self) -> Result<Vec<RevenueByMonth>, AppError> {
        let entries = sqlx::query_as::<_, RevenueByMonth>(
            r#"
            SELECT
                to_char(date_trunc('month', paid_at), 'YYYY-MM') AS month,
                SUM(total) AS total
            FROM invoices
            WHERE status = 'PAID'
              AND paid_at >= NOW() - INTERVAL '6 months'
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
