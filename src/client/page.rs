//! Controller for the message page.
//!
//! Every network call is spawned onto the tokio runtime and the caller gets the task's
//! `JoinHandle` back immediately. Concurrent calls are not ordered against each other:
//! when two counter fetches overlap, whichever resolves last owns the count display.

use super::request::{RequestError, Transport};
use super::view::View;
use crate::models::{Action, ActionRequest, ApiResponse};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::warn;

pub const EMPTY_MESSAGE_WARNING: &str = "Message is Empty";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Message is Empty")]
    EmptyMessage,
    #[error("a submission is already in progress")]
    InFlight,
}

pub struct Page<V: View> {
    transport: Arc<dyn Transport>,
    view: Arc<V>,
    submitting: Arc<AtomicBool>,
}

impl<V: View> Clone for Page<V> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            view: Arc::clone(&self.view),
            submitting: Arc::clone(&self.submitting),
        }
    }
}

impl<V: View> Page<V> {
    pub fn new(transport: Arc<dyn Transport>, view: Arc<V>) -> Self {
        Self {
            transport,
            view,
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Page-ready hook. Must run inside a tokio runtime.
    pub fn bootstrap(&self) -> JoinHandle<()> {
        self.fetch_count()
    }

    pub fn fetch_count(&self) -> JoinHandle<()> {
        let view = Arc::clone(&self.view);
        self.request(
            ActionRequest::get_count(),
            move |response| view.set_count(&response.message),
            |err| warn!(error = %err, "count fetch failed: {}", err.message()),
        )
    }

    /// Validates and dispatches the form.
    ///
    /// The submit control is disabled for the lifetime of the submission and re-enabled
    /// on every exit path. A second submit while one is outstanding is refused without
    /// touching the network.
    pub fn submit_form(&self, action: Action) -> Result<JoinHandle<()>, SubmitError> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }
        self.view.set_submit_enabled(false);

        let message = self.view.message_value();
        if action == Action::SendMessage && message.is_empty() {
            self.finish_submission();
            self.view.show_warning(EMPTY_MESSAGE_WARNING);
            return Err(SubmitError::EmptyMessage);
        }

        let payload = ActionRequest {
            action,
            message: (action == Action::SendMessage).then_some(message),
        };

        let on_success = self.clone();
        let on_failure = self.clone();
        Ok(self.request(
            payload,
            move |response| {
                on_success.view.set_result(&response.message);
                on_success.view.show_info();
                on_success.finish_submission();
            },
            move |err| {
                warn!(error = %err, "form submit failed: {}", err.message());
                on_failure.view.show_warning(err.message());
                on_failure.finish_submission();
            },
        ))
    }

    /// Sends `payload` once and hands the outcome to exactly one of the callbacks.
    pub fn request<S, F>(&self, payload: ActionRequest, on_success: S, on_failure: F) -> JoinHandle<()>
    where
        S: FnOnce(ApiResponse) + Send + 'static,
        F: FnOnce(RequestError) + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            match transport.send(&payload).await {
                Ok(response) => on_success(response),
                Err(err) => on_failure(err),
            }
        })
    }

    fn finish_submission(&self) {
        self.submitting.store(false, Ordering::Release);
        self.view.set_submit_enabled(true);
    }
}
