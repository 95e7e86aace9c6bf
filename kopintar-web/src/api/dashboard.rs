use kopintar_common::dashboard::{
    chart_data, CategoryCount, ChartDatum, DashboardSummary, GroupArea, GroupPopulation,
    GroupYield, VarietyCount,
};
use kopintar_common::ApiError;
use leptos::logging;

use super::ApiClient;

/// Category or per-group aggregates behind a dashboard chart
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Distribution {
    JenisKopi,
    MetodePanen,
    MetodePengolahan,
    ProsesPengeringan,
    MetodePenjualan,
    VarietasKopi,
    KelompokHasil,
    KelompokLahan,
    KelompokPopulasi,
}

impl Distribution {
    pub fn path(&self) -> &'static str {
        match self {
            Distribution::JenisKopi => "/dashboard/distribusi-jenis-kopi",
            Distribution::MetodePanen => "/dashboard/distribusi-metode-panen",
            Distribution::MetodePengolahan => "/dashboard/distribusi-metode-pengolahan",
            Distribution::ProsesPengeringan => "/dashboard/distribusi-proses-pengeringan",
            Distribution::MetodePenjualan => "/dashboard/distribusi-metode-penjualan",
            Distribution::VarietasKopi => "/dashboard/distribusi-varietas-kopi",
            Distribution::KelompokHasil => "/dashboard/kelompok-tani-vs-hasil",
            Distribution::KelompokLahan => "/dashboard/kelompok-tani-vs-lahan",
            Distribution::KelompokPopulasi => "/dashboard/kelompok-tani-vs-populasi",
        }
    }
}

impl ApiClient {
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.get("/dashboard/summary").await
    }

    /// Chart-ready rows: mapped, filtered and title-cased
    pub async fn distribution(&self, kind: Distribution) -> Result<Vec<ChartDatum>, ApiError> {
        let path = kind.path();
        let data = match kind {
            Distribution::VarietasKopi => chart_data(self.get::<Vec<VarietyCount>>(path).await?),
            Distribution::KelompokHasil => chart_data(self.get::<Vec<GroupYield>>(path).await?),
            Distribution::KelompokLahan => chart_data(self.get::<Vec<GroupArea>>(path).await?),
            Distribution::KelompokPopulasi => {
                chart_data(self.get::<Vec<GroupPopulation>>(path).await?)
            }
            _ => chart_data(self.get::<Vec<CategoryCount>>(path).await?),
        };
        Ok(data)
    }

    /// Empty chart instead of an error
    pub async fn distribution_or_default(&self, kind: Distribution) -> Vec<ChartDatum> {
        self.distribution(kind).await.unwrap_or_else(|e| {
            logging::error!("Error fetching {}: {}", kind.path(), e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_paths() {
        assert_eq!(
            Distribution::JenisKopi.path(),
            "/dashboard/distribusi-jenis-kopi"
        );
        assert_eq!(
            Distribution::KelompokPopulasi.path(),
            "/dashboard/kelompok-tani-vs-populasi"
        );
    }
}
