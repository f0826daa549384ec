//! HTTP rendering of [`AppError`]

use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
            "fields": self.fields(),
            "notices": self.notices(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use crate::notice::Notice;
    use crate::validation::FieldErrors;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_problem_json_body() {
        let mut fields = FieldErrors::new();
        fields.add("title", "This field is required.");
        let response = AppError::validation(fields)
            .with_notice(Notice::error("title: This field is required."))
            .into_response();
        assert_eq!(response.status(), 422);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 422);
        assert_eq!(body["fields"]["title"][0], "This field is required.");
        assert_eq!(body["notices"][0]["level"], "error");
    }
}
