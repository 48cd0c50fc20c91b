use super::*;

impl InsightWindow {
    pub(super) fn render_empty_preview(&self, cx: &mut Context<Self>) -> AnyElement {
        div()
            .id(SharedString::from("preview-empty"))
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .bg(cx.theme().secondary)
            .cursor_pointer()
            .on_click(cx.listener(|this, _, _, cx| this.browse_image(cx)))
            .child(
                v_flex()
                    .items_center()
                    .gap_2()
                    .text_color(cx.theme().muted_foreground)
                    .child(Icon::new(IconName::FolderOpen).large())
                    .child(div().text_sm().child("Drop an image here or click to browse")),
            )
            .into_any_element()
    }

    pub(super) fn render_preview(&self, path: &Path, cx: &mut Context<Self>) -> AnyElement {
        div()
            .id(SharedString::from("preview-image"))
            .size_full()
            .max_w(px(PREVIEW_MAX_WIDTH))
            .max_h(px(PREVIEW_MAX_HEIGHT))
            .flex()
            .items_center()
            .justify_center()
            .cursor_pointer()
            .on_click(cx.listener(|this, _, _, cx| this.show_enlarged(cx)))
            .child(
                img(path.to_path_buf())
                    .size_full()
                    .object_fit(ObjectFit::Contain)
                    .with_fallback(|| image_fallback("No preview available")),
            )
            .into_any_element()
    }

    pub(super) fn render_left_pane(&self, cx: &mut Context<Self>) -> AnyElement {
        let preview = match self.state.image_path.as_deref() {
            Some(path) => self.render_preview(path, cx),
            None => self.render_empty_preview(cx),
        };
        let drop_target = cx.theme().drop_target;
        let muted_foreground = cx.theme().muted_foreground;

        v_flex()
            .w_1_2()
            .h_full()
            .p_2()
            .gap_2()
            .child(
                div()
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .child("Image Preview"),
            )
            .child(
                div()
                    .id(SharedString::from("preview-frame"))
                    .flex_1()
                    .w_full()
                    .flex()
                    .items_center()
                    .justify_center()
                    .overflow_hidden()
                    .bg(cx.theme().muted)
                    .border_1()
                    .border_color(cx.theme().border)
                    .can_drop(|value, _, _| value.is::<ExternalPaths>())
                    .drag_over::<ExternalPaths>(move |style, _, _, _| style.bg(drop_target))
                    .on_drop(cx.listener(|this, paths: &ExternalPaths, _, cx| {
                        this.open_dropped(paths.paths(), cx);
                    }))
                    .child(preview),
            )
            .children(
                self.state
                    .file_name()
                    .map(|name| div().text_sm().text_color(muted_foreground).child(name)),
            )
            .into_any_element()
    }
}
