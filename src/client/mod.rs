//! Client side of the endpoint: the HTTP request wrapper, the page's element contract
//! and the controller that drives both.

pub mod page;
pub mod request;
pub mod view;

pub use page::{Page, SubmitError};
pub use request::{ApiClient, RequestError, Transport, FALLBACK_ERROR_MESSAGE};
pub use view::{PageModel, PageSnapshot, View, Visibility};
