use super::*;

pub(super) fn image_fallback(message: &str) -> AnyElement {
    div()
        .size_full()
        .bg(gpui::rgb(0x1a1a1a))
        .flex()
        .flex_col()
        .items_center()
        .justify_center()
        .gap_1()
        .text_color(gpui::rgb(0x888888))
        .child(Icon::new(IconName::File).size(px(16.0)))
        .child(div().text_xs().child(message.to_string()))
        .into_any_element()
}

pub(super) fn first_supported_path(paths: &[PathBuf]) -> Option<PathBuf> {
    paths
        .iter()
        .find(|path| path.is_file() && formats::is_supported(path))
        .cloned()
}

/// Blocking error dialog.
pub(super) fn show_error(message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

pub(super) fn show_info(title: &str, message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
