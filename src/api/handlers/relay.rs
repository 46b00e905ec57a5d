use serde::{Deserialize, Serialize};

/// Result record returned to the function caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn success(body: String) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }

    pub fn failure(body: String) -> Self {
        Self {
            status_code: 500,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_shape() {
        let response = InvocationResponse::success("file.txt uploaded successfully".to_string());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "statusCode": 200, "body": "file.txt uploaded successfully" })
        );
    }
}
