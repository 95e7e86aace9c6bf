use kopintar_common::cluster::ClusteringData;
use kopintar_common::recommendation::{
    LaporanRequest, RecommendationRequest, RecommendationResponse, RECOMMENDATION_FAILED,
    REPORT_FAILED,
};
use kopintar_common::wordcloud::WordWeight;
use kopintar_common::ApiError;
use leptos::logging;
use serde_json::Value;

use super::ApiClient;

/// Keep the status, replace the message with localized text
fn wrap(error: ApiError, message: &str) -> ApiError {
    ApiError {
        message: message.to_string(),
        ..error
    }
}

impl ApiClient {
    pub async fn cluster_produk_budidaya(&self) -> Result<ClusteringData, ApiError> {
        self.get("/analysis/cluster-produk-budidaya").await
    }

    pub async fn cluster_profil_pasar(&self) -> Result<ClusteringData, ApiError> {
        self.get("/analysis/cluster-profil-pasar").await
    }

    /// Non-array payloads count as empty
    async fn words(&self, path: &str) -> Vec<WordWeight> {
        match self.get::<Value>(path).await {
            Ok(value @ Value::Array(_)) => serde_json::from_value(value).unwrap_or_default(),
            Ok(_) => Vec::new(),
            Err(e) => {
                logging::error!("Gagal memuat data wordcloud: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn wordcloud_masalah(&self) -> Vec<WordWeight> {
        self.words("/analysis/wordcloud-data").await
    }

    pub async fn wordcloud_pelatihan(&self) -> Vec<WordWeight> {
        self.words("/analysis/wordcloud-pelatihan").await
    }

    pub async fn recommendation(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, ApiError> {
        self.post("/analysis/recommendation", request)
            .await
            .map_err(|e| wrap(e, RECOMMENDATION_FAILED))
    }

    pub async fn laporan_masalah(&self, request: &LaporanRequest) -> Result<Value, ApiError> {
        self.post("/analysis/laporan-masalah", request)
            .await
            .map_err(|e| wrap(e, REPORT_FAILED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_keeps_status() {
        let err = wrap(ApiError::from_status(502, "Bad Gateway", None), REPORT_FAILED);
        assert_eq!(err.status, Some(502));
        assert_eq!(err.message, REPORT_FAILED);
    }
}
