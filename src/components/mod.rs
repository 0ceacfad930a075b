pub mod app;
pub mod camera_controls;
pub mod cart_panel;
pub mod connect_overlay;
pub mod help_overlay;
pub mod intel_panel;
pub mod legend;
pub mod legend_panel;
pub mod lobby_view;
pub mod map_view;
pub mod notice_banner;
pub mod status_bar;
