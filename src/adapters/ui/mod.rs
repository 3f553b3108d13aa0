pub mod banner;
pub mod progress;
pub mod render;
pub mod tui;

/// Prints the welcome banner and applies the theme for all subsequent inquire prompts.
/// Call once at startup, interactive mode only.
pub fn init_ui(banner: &banner::Banner) {
    banner.print();
    tui::apply_theme();
}
