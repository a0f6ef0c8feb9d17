//! UI panel modules rendered from the app update loop.

/// Editor header, toolbar and edit/preview panes.
pub(super) mod editor_panel;
/// Markdown preview pane.
pub(super) mod preview;
/// Settings page.
pub(super) mod settings_view;
/// Left sidebar with the file list.
pub(super) mod sidebar;
/// Bottom status bar content.
pub(super) mod status_bar;
/// Transient toast notifications.
pub(super) mod toasts;
