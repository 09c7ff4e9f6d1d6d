use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// The page elements the controller reads and writes.
///
/// Implementations use interior mutability: callbacks hold a shared reference and may
/// run on any runtime worker.
pub trait View: Send + Sync + 'static {
    fn set_count(&self, text: &str);
    fn message_value(&self) -> String;
    fn set_result(&self, text: &str);
    fn show_info(&self);
    fn show_warning(&self, text: &str);
    fn set_submit_enabled(&self, enabled: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub count: String,
    pub message: String,
    pub result: String,
    pub info: Visibility,
    pub warning: Visibility,
    pub warning_text: String,
    pub submit_enabled: bool,
    /// Every enable/disable of the submit control, oldest first.
    pub submit_toggles: Vec<bool>,
}

impl Default for PageSnapshot {
    fn default() -> Self {
        Self {
            count: String::new(),
            message: String::new(),
            result: String::new(),
            info: Visibility::Hidden,
            warning: Visibility::Hidden,
            warning_text: String::new(),
            submit_enabled: true,
            submit_toggles: Vec::new(),
        }
    }
}

/// In-memory page, used headless and in tests.
#[derive(Debug, Default)]
pub struct PageModel {
    state: Mutex<PageSnapshot>,
}

impl PageModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&self, text: impl Into<String>) {
        self.with(|page| page.message = text.into());
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.with(|page| page.clone())
    }

    fn with<R>(&self, f: impl FnOnce(&mut PageSnapshot) -> R) -> R {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl View for PageModel {
    fn set_count(&self, text: &str) {
        self.with(|page| page.count = text.to_string());
    }

    fn message_value(&self) -> String {
        self.with(|page| page.message.clone())
    }

    fn set_result(&self, text: &str) {
        self.with(|page| page.result = text.to_string());
    }

    fn show_info(&self) {
        self.with(|page| page.info = Visibility::Visible);
    }

    fn show_warning(&self, text: &str) {
        self.with(|page| {
            page.warning_text = text.to_string();
            page.warning = Visibility::Visible;
        });
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.with(|page| {
            page.submit_enabled = enabled;
            page.submit_toggles.push(enabled);
        });
    }
}
