use kopintar_common::{ApiError, PetaniRecord};
use serde_json::{Map, Value};

use super::ApiClient;

impl ApiClient {
    /// Raw records; normalization happens on the list page
    pub async fn list_petani(&self) -> Result<Vec<Value>, ApiError> {
        self.get("/petani/").await
    }

    pub async fn get_petani(&self, id: &str) -> Result<PetaniRecord, ApiError> {
        let value: Value = self.get(&petani_path(id)).await?;
        Ok(PetaniRecord::from_value(value))
    }

    pub async fn create_petani(&self, record: &PetaniRecord) -> Result<Value, ApiError> {
        self.post("/petani/", record.as_map()).await
    }

    pub async fn update_petani(
        &self,
        id: &str,
        payload: &Map<String, Value>,
    ) -> Result<Value, ApiError> {
        self.put(&petani_path(id), payload).await
    }

    pub async fn delete_petani(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&petani_path(id)).await
    }
}

fn petani_path(id: &str) -> String {
    format!("/petani/{}", urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_petani_path() {
        assert_eq!(petani_path("17"), "/petani/17");
        assert_eq!(petani_path("a b"), "/petani/a%20b");
    }
}
