use super::*;

impl InsightWindow {
    pub(super) fn new(services: AnalysisServices, focus_handle: FocusHandle) -> Self {
        Self {
            state: AppState::default(),
            services,
            status: String::from("Select an image file to inspect its metadata."),
            focus_handle,
            enlarged_window: None,
        }
    }

    /// Whether the enlarged-image window is still open.
    pub(super) fn enlarged_window_open(&self, cx: &mut Context<Self>) -> bool {
        let Some(handle) = self.enlarged_window else {
            return false;
        };

        handle.update(cx, |_, _, _| ()).is_ok()
    }
}
