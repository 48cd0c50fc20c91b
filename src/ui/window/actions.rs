use super::*;

impl InsightWindow {
    pub(super) fn browse_image(&mut self, cx: &mut Context<Self>) {
        let maybe_path = rfd::FileDialog::new()
            .set_title("Select an image file")
            .add_filter("Image files", SUPPORTED_EXTENSIONS)
            .pick_file();

        if let Some(path) = maybe_path {
            self.open_image(path, cx);
        }
    }

    pub(super) fn open_dropped(&mut self, paths: &[PathBuf], cx: &mut Context<Self>) {
        match first_supported_path(paths) {
            Some(path) => self.open_image(path, cx),
            None => {
                self.status = String::from("Dropped files are not supported images.");
                cx.notify();
            }
        }
    }

    pub(super) fn open_image(&mut self, path: PathBuf, cx: &mut Context<Self>) {
        match self.state.open_image(&path, &self.services) {
            Ok(outcome) => {
                for warning in &outcome.warnings {
                    show_error(warning);
                }
                self.status = format!(
                    "Loaded {}",
                    self.state.file_name().unwrap_or_else(|| path.display().to_string())
                );
            }
            Err(err) => {
                log::error!("failed to open {}: {err}", path.display());
                show_error(&err.to_string());
                self.status = String::from("Could not open the selected file.");
            }
        }

        cx.notify();
    }

    pub(super) fn save_output(&mut self, cx: &mut Context<Self>) {
        if !self.state.can_save() {
            self.status = String::from("Open an image before saving.");
            cx.notify();
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .set_title("Save metadata")
            .add_filter("Text files", &["txt"])
            .add_filter("All files", &["*"])
            .set_file_name("metadata.txt")
            .save_file()
        else {
            self.status = String::from("Save cancelled");
            cx.notify();
            return;
        };

        let path = report::with_default_extension(path);
        match self.state.save_output(&path) {
            Ok(()) => {
                show_info("Success", "Metadata successfully saved.");
                self.status = format!("Saved {}", path.display());
            }
            Err(err) => {
                log::error!("failed to save {}: {err}", path.display());
                show_error(&err.to_string());
                self.status = String::from("Save failed");
            }
        }

        cx.notify();
    }

    /// Opens the enlarged preview unless one is already open.
    pub(super) fn show_enlarged(&mut self, cx: &mut Context<Self>) {
        if self.enlarged_window_open(cx) {
            return;
        }

        let Some(path) = self.state.image_path.clone() else {
            return;
        };

        let bounds = Bounds::centered(None, size(px(1200.0), px(900.0)), cx);
        let opened = cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(gpui::TitlebarOptions {
                    title: Some(ENLARGED_WINDOW_TITLE.into()),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            },
            |window, cx| {
                let view = cx.new(|_| EnlargedImageView::new(path));
                cx.new(|cx| Root::new(view, window, cx))
            },
        );

        match opened {
            Ok(handle) => self.enlarged_window = Some(handle),
            Err(err) => {
                log::error!("failed to open enlarged preview: {err}");
                show_error(&format!("Error loading large image: {err}"));
            }
        }
    }
}
