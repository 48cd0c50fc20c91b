use std::path::{Path, PathBuf};

use crate::app::{AnalysisServices, AppState};
use crate::core::formats::{self, SUPPORTED_EXTENSIONS};
use crate::core::report;
use gpui::{
    div, img, px, size, AnyElement, App, AppContext as _, Bounds, Context, ExternalPaths,
    FocusHandle, Focusable, InteractiveElement as _, IntoElement, ObjectFit,
    ParentElement as _, Render, SharedString, StatefulInteractiveElement as _, Styled as _,
    StyledImage as _, Window, WindowBounds, WindowHandle, WindowOptions,
};
use gpui_component::button::{Button, ButtonVariants as _};
use gpui_component::divider::Divider;
use gpui_component::scroll::ScrollableElement as _;
use gpui_component::theme::{ActiveTheme, Theme, ThemeMode};
use gpui_component::{h_flex, v_flex, Disableable as _, Icon, IconName, Root, Sizable as _};

mod actions;
mod enlarged;
mod render_media;
mod render_output;
mod render_shell;
mod state;
mod utils;

use self::enlarged::EnlargedImageView;
use self::utils::{first_supported_path, image_fallback, show_error, show_info};

const MAIN_WINDOW_TITLE: &str = "EXIF Metadata Extractor";
const ENLARGED_WINDOW_TITLE: &str = "Large Image Preview";
const PREVIEW_MAX_WIDTH: f32 = 800.0;
const PREVIEW_MAX_HEIGHT: f32 = 600.0;

struct InsightWindow {
    state: AppState,
    services: AnalysisServices,
    status: String,
    focus_handle: FocusHandle,
    /// The single enlarged-image window, if one has been opened.
    enlarged_window: Option<WindowHandle<Root>>,
}

impl Focusable for InsightWindow {
    fn focus_handle(&self, _: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

pub fn open_insight_window(services: AnalysisServices, cx: &mut App) -> anyhow::Result<()> {
    let bounds = Bounds::centered(None, size(px(1200.0), px(800.0)), cx);

    cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: Some(gpui::TitlebarOptions {
                title: Some(MAIN_WINDOW_TITLE.into()),
                appears_transparent: false,
                traffic_light_position: None,
            }),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| InsightWindow::new(services, cx.focus_handle()));
            cx.new(|cx| Root::new(view, window, cx))
        },
    )?;

    Ok(())
}
