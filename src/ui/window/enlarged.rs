use super::*;

/// Second top-level window showing the current image at native scale.
pub(super) struct EnlargedImageView {
    path: PathBuf,
}

impl EnlargedImageView {
    pub(super) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Render for EnlargedImageView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .id(SharedString::from("enlarged-root"))
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .overflow_hidden()
            .bg(cx.theme().background)
            .child(
                img(self.path.clone())
                    .size_full()
                    .object_fit(ObjectFit::ScaleDown)
                    .with_fallback(|| image_fallback("Error loading large image")),
            )
    }
}
