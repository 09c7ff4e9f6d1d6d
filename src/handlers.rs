use crate::errors::AppError;
use crate::models::{Action, ActionRequest, ApiResponse, QueuedMessage};
use crate::queue::{self, SendOutcome};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    response::Html,
    Json,
};
use chrono::Local;
use std::net::SocketAddr;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info};

pub const SEND_ACCEPTED: &str = "Success. Please Receive.";
pub const EMPTY_QUEUE: &str = "Empty.";
pub const EMPTY_MESSAGE: &str = "Message is Empty";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.settings.api_url))
}

pub async fn api(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let source_ip = peer
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            info!(%source_ip, "rejected api request: {}", rejection.body_text());
            return Err(AppError::bad_request(rejection.body_text()));
        }
    };
    info!(%source_ip, action = %request.action, "api request");

    let result = match request.action {
        Action::GetCount => get_count(&state).await,
        Action::SendMessage => send_message(&state, request.message).await,
        Action::ReceiveMessage => receive_message(&state).await,
    };

    if let Err(err) = &result {
        if err.status.is_server_error() {
            error!(action = %request.action, "{}", err.message);
        }
    }
    result.map(Json)
}

async fn get_count(state: &AppState) -> Result<ApiResponse, AppError> {
    let data = state.data.lock().await;
    Ok(ApiResponse::new(queue::count(&data).to_string()))
}

async fn send_message(state: &AppState, message: Option<String>) -> Result<ApiResponse, AppError> {
    let Some(body) = message else {
        return Err(AppError::bad_request("message is required"));
    };
    if body.is_empty() {
        return Err(AppError::bad_request(EMPTY_MESSAGE));
    }

    let outcome = {
        let mut data = state.data.lock().await;
        let mut next = data.clone();
        let outcome = queue::send(&mut next, &body, &state.settings.message_group_id, Local::now());
        if matches!(outcome, SendOutcome::Enqueued(_)) {
            persist_data(&state.data_path, &next).await?;
        }
        *data = next;
        outcome
    };

    match outcome {
        SendOutcome::Enqueued(id) => {
            debug!(id, "message enqueued");
            state.arrivals.notify_waiters();
        }
        SendOutcome::Duplicate => debug!("duplicate send dropped"),
    }

    Ok(ApiResponse::new(SEND_ACCEPTED))
}

async fn receive_message(state: &AppState) -> Result<ApiResponse, AppError> {
    let message = receive_with_wait(state).await?;
    Ok(ApiResponse::new(
        message.map(|message| message.body).unwrap_or_else(|| EMPTY_QUEUE.to_string()),
    ))
}

/// Long-polls for up to the configured wait before reporting an empty queue.
///
/// Mutations are staged on a copy and only committed once persisted.
async fn receive_with_wait(state: &AppState) -> Result<Option<QueuedMessage>, AppError> {
    let deadline = Instant::now() + state.settings.receive_wait;
    loop {
        let arrival = state.arrivals.notified();
        tokio::pin!(arrival);
        arrival.as_mut().enable();

        {
            let mut data = state.data.lock().await;
            let mut next = data.clone();
            if let Some(message) = queue::receive(&mut next) {
                persist_data(&state.data_path, &next).await?;
                *data = next;
                return Ok(Some(message));
            }
        }

        if timeout_at(deadline, arrival).await.is_err() {
            return Ok(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::QueueData;
    use crate::state::AppState;
    use std::path::PathBuf;
    use std::time::Duration;

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("queue_courier_handlers_{tag}_{}_{nanos}.json", std::process::id()))
    }

    fn state_with(data_path: PathBuf, receive_wait: Duration, data: QueueData) -> AppState {
        AppState::new(
            Settings {
                data_path,
                receive_wait,
                ..Settings::default()
            },
            data,
        )
    }

    async fn call(state: &AppState, request: ActionRequest) -> Result<ApiResponse, AppError> {
        api(State(state.clone()), None, Ok(Json(request)))
            .await
            .map(|Json(response)| response)
    }

    async fn count_of(state: &AppState) -> String {
        call(state, ActionRequest::get_count()).await.unwrap().message
    }

    fn unwritable_path() -> PathBuf {
        temp_path("missing_dir").join("queue.json")
    }

    #[tokio::test]
    async fn failed_persist_keeps_message_queued_on_receive() {
        let mut data = QueueData::default();
        queue::send(&mut data, "keep me", "g", Local::now());
        let state = state_with(unwritable_path(), Duration::ZERO, data);

        let err = call(&state, ActionRequest::receive_message()).await.unwrap_err();

        assert!(err.status.is_server_error());
        assert_eq!(count_of(&state).await, "1");
        let data = state.data.lock().await;
        assert_eq!(data.messages[0].body, "keep me");
    }

    #[tokio::test]
    async fn failed_persist_does_not_enqueue_send() {
        let state = state_with(unwritable_path(), Duration::ZERO, QueueData::default());

        let err = call(&state, ActionRequest::send_message("lost")).await.unwrap_err();

        assert!(err.status.is_server_error());
        assert_eq!(count_of(&state).await, "0");
        let data = state.data.lock().await;
        assert!(data.recent_dedup.is_empty());
        assert_eq!(data.next_id, 0);
    }

    #[tokio::test]
    async fn pending_receive_wakes_on_send() {
        let path = temp_path("wake");
        let wait = Duration::from_secs(5);
        let state = state_with(path.clone(), wait, QueueData::default());

        let started = std::time::Instant::now();
        let receiver = {
            let state = state.clone();
            tokio::spawn(async move { call(&state, ActionRequest::receive_message()).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        let sent = call(&state, ActionRequest::send_message("wake up")).await.unwrap();
        assert_eq!(sent.message, SEND_ACCEPTED);

        let received = receiver.await.unwrap().unwrap();
        assert_eq!(received.message, "wake up");
        assert!(started.elapsed() < wait);
        assert_eq!(count_of(&state).await, "0");
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn empty_receive_waits_out_the_deadline() {
        let wait = Duration::from_millis(300);
        let state = state_with(temp_path("empty"), wait, QueueData::default());

        let started = std::time::Instant::now();
        let response = call(&state, ActionRequest::receive_message()).await.unwrap();

        assert_eq!(response.message, EMPTY_QUEUE);
        assert!(started.elapsed() >= wait);
    }

    #[tokio::test]
    async fn empty_and_missing_messages_are_bad_requests() {
        let state = state_with(temp_path("invalid"), Duration::ZERO, QueueData::default());

        let empty = call(&state, ActionRequest::send_message("")).await.unwrap_err();
        assert_eq!(empty.message, EMPTY_MESSAGE);

        let missing = call(
            &state,
            ActionRequest {
                action: Action::SendMessage,
                message: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(missing.message, "message is required");
        assert_eq!(count_of(&state).await, "0");
    }
}
