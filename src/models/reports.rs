// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Resumo (os cards do topo da tela de relatórios)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_leads: i64,
    pub won_leads: i64,
    pub total_revenue: Decimal,
    pub avg_deal_size: Decimal,
    pub conversion_rate: f64,
}

impl ReportSummary {
    // Reduções puras sobre os agregados já carregados, recalculadas a cada
    // requisição. Divisões guardadas contra zero.
    pub fn from_counts(total_leads: i64, won_leads: i64, total_revenue: Decimal) -> Self {
        let avg_deal_size = if won_leads > 0 {
            total_revenue / Decimal::from(won_leads)
        } else {
            Decimal::ZERO
        };
        let conversion_rate = if total_leads > 0 {
            (won_leads as f64 / total_leads as f64) * 100.0
        } else {
            0.0
        };

        Self {
            total_leads,
            won_leads,
            total_revenue,
            avg_deal_size,
            conversion_rate,
        }
    }
}

// 2. Funil de conversão (contagem de leads por etapa, na ordem do funil)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageFunnelEntry {
    pub key: String,
    pub name: String,
    pub position: i32,
    pub lead_count: i64,
}

// 3. Receita por mês (a série do gráfico de tendência)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueByMonth {
    // O SQL retorna o mês como string (YYYY-MM)
    pub month: Option<String>,
    pub total: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_math_over_loaded_aggregates() {
        let summary = ReportSummary::from_counts(40, 10, Decimal::new(200_000, 2));
        assert_eq!(summary.avg_deal_size, Decimal::new(20_000, 2));
        assert!((summary.conversion_rate - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_leads_yields_zeroed_rates() {
        let summary = ReportSummary::from_counts(0, 0, Decimal::ZERO);
        assert_eq!(summary.conversion_rate, 0.0);
        assert_eq!(summary.avg_deal_size, Decimal::ZERO);
    }

    #[test]
    fn revenue_without_wins_does_not_divide_by_zero() {
        let summary = ReportSummary::from_counts(5, 0, Decimal::new(100_00, 2));
        assert_eq!(summary.avg_deal_size, Decimal::ZERO);
        assert_eq!(summary.conversion_rate, 0.0);
    }
}
