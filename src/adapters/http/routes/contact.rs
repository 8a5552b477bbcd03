use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use waitlist_types::{ContactRequest, ContactResponse};

use crate::{
    adapters::http::app_state::AppState, app_error::AppResult, use_cases::contact::ContactUseCases,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/contact", post(submit))
}

/// POST /api/contact
async fn submit(
    State(contact): State<Arc<ContactUseCases>>,
    Json(payload): Json<ContactRequest>,
) -> AppResult<Json<ContactResponse>> {
    let message_id = contact.submit(payload).await?;
    Ok(Json(ContactResponse {
        success: true,
        message_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::test_utils::TestAppStateBuilder;

    fn build_test_router(app_state: AppState) -> Router<()> {
        router().with_state(app_state)
    }

    #[tokio::test]
    async fn contact_relays_to_inbox() {
        let (app_state, mocks) = TestAppStateBuilder::new().build_with_mocks();
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let response = server
            .post("/contact")
            .json(&json!({
                "name": "Bob",
                "email": "bob@example.com",
                "message": "<script>alert(1)</script>",
                "skills": "Design"
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["messageId"], "email_test_1");

        let sent = mocks.email.sent();
        assert_eq!(sent[0].to, "team@skillpod.test");
        assert!(!sent[0].html.contains("<script>"));
    }

    #[tokio::test]
    async fn contact_missing_fields_returns_400() {
        let (app_state, mocks) = TestAppStateBuilder::new().build_with_mocks();
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let response = server
            .post("/contact")
            .json(&json!({ "name": "Bob", "email": "bob@example.com", "message": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(mocks.email.sent().is_empty());
    }

    #[tokio::test]
    async fn contact_delivery_failure_returns_500() {
        let (app_state, mocks) = TestAppStateBuilder::new().build_with_mocks();
        mocks.email.set_failing(true);
        let server = TestServer::new(build_test_router(app_state)).unwrap();

        let response = server
            .post("/contact")
            .json(&json!({ "name": "Bob", "email": "bob@example.com", "message": "hi" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "EMAIL_DELIVERY_FAILED");
    }
}
