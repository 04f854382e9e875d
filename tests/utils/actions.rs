use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceExt;

use odds::room::types::{JoinRoomResponse, RoomStateResponse};
use odds::RoomModel;

use super::setup::TestSetup;

// ============================================================================
// HTTP Actions
// ============================================================================

impl TestSetup {
    pub async fn request(&self, method: &str, uri: &str, body: String) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn join(&self, name: &str) -> JoinRoomResponse {
        let response = self
            .request("POST", "/room", json!({ "name": name }).to_string())
            .await;
        assert_eq!(response.status(), StatusCode::OK, "join should succeed");
        read_json(response).await
    }

    pub async fn leave(&self, player_id: &str) -> Response {
        self.request("DELETE", "/room", json!({ "playerId": player_id }).to_string())
            .await
    }

    pub async fn submit(&self, player_id: &str, number: u64) -> Response {
        self.request(
            "PATCH",
            "/room",
            json!({ "playerId": player_id, "number": number }).to_string(),
        )
        .await
    }

    pub async fn room_state(&self) -> RoomModel {
        let response = self.request("GET", "/room", String::new()).await;
        assert_eq!(response.status(), StatusCode::OK);
        read_json::<RoomStateResponse>(response).await.room_state
    }
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
