use super::*;

impl Render for InsightWindow {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .id(SharedString::from("insight-root"))
            .track_focus(&self.focus_handle(cx))
            .size_full()
            .p_4()
            .gap_2()
            .flex()
            .bg(cx.theme().background)
            .text_color(cx.theme().foreground)
            .child(self.render_left_pane(cx))
            .child(Divider::vertical().color(cx.theme().border))
            .child(self.render_right_pane(cx))
    }
}
