use anyhow::Context as _;
use gpui::{App, Application};
use gpui_component_assets::Assets;
use photo_insight::app::AnalysisServices;
use photo_insight::config::AppConfig;
use photo_insight::ui::window::open_insight_window;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("failed to load configuration")?;

    env_logger::Builder::new()
        .filter_level(config.log_filter())
        .parse_default_env()
        .init();

    log::info!("starting photo-insight");
    let services = AnalysisServices::from_config(&config)?;

    Application::new().with_assets(Assets).run(move |cx: &mut App| {
        gpui_component::init(cx);
        if let Err(err) = open_insight_window(services, cx) {
            log::error!("failed to open main window: {err:#}");
            cx.quit();
            return;
        }
        cx.activate(true);
    });

    Ok(())
}
