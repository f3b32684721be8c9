// src/services/reports_service.rs

use crate::{
    common::{
        error::AppError,
        retry::{self, RetryPolicy},
    },
    db::ReportRepository,
    models::reports::{ReportSummary, RevenueByMonth, StageFunnelEntry},
};

#[derive(Clone)]
pub struct ReportsService {
    repo: ReportRepository,
    retry: RetryPolicy,
}

impl ReportsService {
    pub fn new(repo: ReportRepository) -> Self {
        Self {
            repo,
            retry: RetryPolicy::default(),
        }
    }

    /// Os cards da tela de relatórios: reduções puras sobre os agregados,
    /// recalculadas a cada requisição.
    pub async fn summary(&self) -> Result<ReportSummary, AppError> {
        let counts = retry::with_backoff(self.retry, || self.repo.lead_counts()).await?;
        let revenue = retry::with_backoff(self.retry, || self.repo.paid_revenue()).await?;

        Ok(ReportSummary::from_counts(counts.total, counts.won, revenue))
    }

    pub async fn stage_funnel(&self) -> Result<Vec<StageFunnelEntry>, AppError> {
        retry::with_backoff(self.retry, || self.repo.stage_funnel()).await
    }

    pub async fn revenue_by_month(&self) -> Result<Vec<RevenueByMonth>, AppError> {
        retry::with_backoff(self.retry, || self.repo.revenue_by_month()).await
    }
}
