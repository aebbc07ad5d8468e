pub mod history_panel;
pub mod options_panel;
pub mod status_bar;
pub mod toolbar;
