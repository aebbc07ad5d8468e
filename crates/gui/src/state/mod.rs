pub mod catalog;
pub mod session;
pub mod settings;

use shared::TemplateObject;

use crate::anchor::SimulatedFeed;
pub use session::{Affordances, ArSession, PlacementConfig};
pub use settings::AppSettings;

/// Panel visibility flags
pub struct PanelVisibility {
    pub history: bool,
    pub status_bar: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            history: true,
            status_bar: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub session: ArSession<SimulatedFeed>,
    pub templates: Vec<TemplateObject>,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
    /// Show the options popup (template, overlay, reset)
    pub show_options: bool,
}

impl AppState {
    /// State over a simulated world; the session starts running immediately
    pub fn new(feed: SimulatedFeed, settings: AppSettings) -> Self {
        let mut session = ArSession::new(feed, settings.placement_config());
        session.backend_mut().camera.fov = settings.camera.fov_degrees.to_radians();
        session.select_template(catalog::small_cube());
        session.start();

        Self {
            session,
            templates: catalog::builtin_templates(),
            panels: PanelVisibility::default(),
            settings,
            show_settings_window: false,
            show_options: false,
        }
    }

    /// Push edited settings into the running session
    pub fn apply_settings(&mut self) {
        self.session
            .set_placement_config(self.settings.placement_config());
        self.session.backend_mut().camera.fov = self.settings.camera.fov_degrees.to_radians();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SimulatedFeed::demo(), AppSettings::load())
    }
}
