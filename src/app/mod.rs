use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::gesture::GestureStateMachine;
use crate::lock::LockState;
use gtk4::prelude::*;
use gtk4::{
    Align, Application, ApplicationWindow, Box as GtkBox, Button, DrawingArea, Label, Orientation,
};

mod motion;
mod presenter;
mod render;
mod wiring;

use self::presenter::{DragTracker, ElementPresenter};
use self::wiring::*;

const APP_ID: &str = "io.github.presslock";
const WINDOW_DEFAULT_WIDTH: i32 = 390;
const WINDOW_DEFAULT_HEIGHT: i32 = 720;
const CHECK_CONFIG_FLAG: &str = "--check-config";

/// Flags understood before GTK sees the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartupConfig {
    pub check_config: bool,
}

impl StartupConfig {
    pub fn from_args() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        for arg in args {
            match arg.as_ref() {
                CHECK_CONFIG_FLAG => config.check_config = true,
                other => tracing::warn!(arg = other, "ignoring unknown argument"),
            }
        }
        config
    }
}

pub struct App {
    config: AppConfig,
    lock: LockState,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            lock: LockState::new(),
        }
    }

    /// Shared flag observed by the window; exposed for embedding callers.
    pub fn lock(&self) -> &LockState {
        &self.lock
    }

    pub fn start(&self) -> AppResult<()> {
        tracing::info!(config = ?self.config, "starting gtk runtime");
        let application = Application::new(Some(APP_ID), gtk4::gio::ApplicationFlags::NON_UNIQUE);

        let config = self.config;
        let lock = self.lock.clone();
        let activate_once = Rc::new(Cell::new(false));
        application.connect_activate(move |app| {
            if activate_once.replace(true) {
                tracing::debug!("ignoring duplicate gtk activate signal");
                return;
            }
            build_window(app, config, &lock);
        });

        // Pass only argv[0] to GTK so app-specific flags do not fail GTK parsing.
        let gtk_args: Vec<String> = std::env::args().take(1).collect();
        let status = application.run_with_args(&gtk_args);
        if status != gtk4::glib::ExitCode::SUCCESS {
            return Err(AppError::GtkExit {
                status: format!("{status:?}"),
            });
        }
        Ok(())
    }
}

fn build_window(app: &Application, config: AppConfig, lock: &LockState) {
    let window = ApplicationWindow::new(app);
    window.set_title(Some("presslock"));
    window.set_default_size(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT);

    let root = GtkBox::new(Orientation::Vertical, 12);
    root.set_margin_top(16);
    root.set_margin_bottom(16);

    let status_label = Label::new(Some(&lock_status_text(lock.read())));
    let area = DrawingArea::new();
    area.set_hexpand(true);
    area.set_vexpand(true);
    let cancel_button = Button::with_label("Cancel");
    cancel_button.set_halign(Align::Center);
    cancel_button.set_visible(lock.read());

    root.append(&status_label);
    root.append(&area);
    root.append(&cancel_button);
    window.set_child(Some(&root));

    let context = GestureContext {
        area,
        machine: Rc::new(RefCell::new(GestureStateMachine::new(
            config.gesture,
            lock.clone(),
        ))),
        presenter: Rc::new(RefCell::new(ElementPresenter::new(
            config.element_diameter,
            config.shimmer_period,
        ))),
        drag: Rc::new(RefCell::new(DragTracker::default())),
    };
    connect_scene_drawing(&context);
    connect_press_and_drag_gestures(&context);
    connect_lock_observers(lock, &context, &status_label, &cancel_button);
    connect_frame_ticks(&context);

    tracing::info!("presenting window");
    window.present();
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_config_detects_check_flag() {
        assert!(StartupConfig::parse(["--check-config"]).check_config);
        assert!(!StartupConfig::parse(Vec::<String>::new()).check_config);
        assert!(!StartupConfig::parse(["--verbose"]).check_config);
    }

    #[test]
    fn new_app_starts_unlocked() {
        let app = App::default();
        assert!(!app.lock().read());
    }
}
