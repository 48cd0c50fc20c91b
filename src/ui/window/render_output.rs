use super::*;

impl InsightWindow {
    pub(super) fn render_output_pane(&self, cx: &mut Context<Self>) -> AnyElement {
        let lines: Vec<String> = self.state.output_text.lines().map(str::to_string).collect();

        div()
            .id(SharedString::from("output-pane"))
            .flex_1()
            .w_full()
            .p_3()
            .bg(cx.theme().secondary)
            .border_1()
            .border_color(cx.theme().border)
            .overflow_y_scrollbar()
            .child(v_flex().w_full().gap_1().children(lines.into_iter().map(|line| {
                div().min_h(px(18.0)).text_sm().child(line)
            })))
            .into_any_element()
    }

    pub(super) fn render_button_bar(&self, cx: &mut Context<Self>) -> AnyElement {
        h_flex()
            .h(px(44.0))
            .w_full()
            .items_center()
            .gap_2()
            .child(
                Button::new("open-image")
                    .small()
                    .primary()
                    .icon(IconName::FolderOpen)
                    .label("Select Image File")
                    .on_click(cx.listener(|this, _, _, cx| this.browse_image(cx))),
            )
            .child(
                Button::new("save-metadata")
                    .small()
                    .icon(IconName::Check)
                    .label("Save Metadata")
                    .disabled(!self.state.can_save())
                    .on_click(cx.listener(|this, _, _, cx| this.save_output(cx))),
            )
            .child(div().flex_1())
            .child(
                Button::new("toggle-theme")
                    .ghost()
                    .small()
                    .icon(if cx.theme().mode == ThemeMode::Dark {
                        IconName::Sun
                    } else {
                        IconName::Moon
                    })
                    .on_click(cx.listener(|_this, _, window, cx| {
                        let new_mode = if cx.theme().mode == ThemeMode::Dark {
                            ThemeMode::Light
                        } else {
                            ThemeMode::Dark
                        };
                        Theme::change(new_mode, Some(window), cx);
                    })),
            )
            .into_any_element()
    }

    pub(super) fn render_right_pane(&self, cx: &mut Context<Self>) -> AnyElement {
        v_flex()
            .w_1_2()
            .h_full()
            .p_2()
            .gap_2()
            .child(self.render_output_pane(cx))
            .child(self.render_button_bar(cx))
            .child(
                div()
                    .text_xs()
                    .text_color(cx.theme().muted_foreground)
                    .child(self.status.clone()),
            )
            .into_any_element()
    }
}
