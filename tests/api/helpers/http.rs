use crate::helpers::TestApp;
use reqwest::Response;
use serde_json::Value;

impl TestApp {
    pub async fn send_get(&self, endpoint: &str) -> Response {
        self.api_client
            .get(format!("{}/{}", self.address, endpoint))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn send_post(&self, endpoint: &str, payload: &Value) -> Response {
        self.api_client
            .post(format!("{}/{}", self.address, endpoint))
            .json(payload)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn send_post_raw(&self, endpoint: &str, body: String) -> Response {
        self.api_client
            .post(format!("{}/{}", self.address, endpoint))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn send_patch_with_payload(&self, endpoint: &str, payload: &Value) -> Response {
        self.api_client
            .patch(format!("{}/{}", &self.address, endpoint))
            .json(payload)
            .send()
            .await
            .expect("Failed to execute PATCH request.")
    }

    pub async fn send_delete(&self, endpoint: &str) -> Response {
        self.api_client
            .delete(format!("{}/{}", &self.address, endpoint))
            .send()
            .await
            .expect("Failed to execute DELETE request.")
    }
}
