use crate::config::Theme;
use eframe::egui;

pub fn apply_theme(ctx: &egui::Context, theme: &Theme) {
    match theme {
        Theme::Light => apply_light_theme(ctx),
        Theme::Dark => apply_dark_theme(ctx),
    }
}

fn apply_light_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = egui::Color32::from_rgb(250, 250, 252);
    style.visuals.window_fill = egui::Color32::WHITE;
    style.visuals.faint_bg_color = egui::Color32::from_rgb(240, 241, 244);
    style.visuals.selection.bg_fill = egui::Color32::from_rgb(66, 133, 244);

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);

    ctx.set_style(style);
}

fn apply_dark_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::dark();
    style.visuals.panel_fill = egui::Color32::from_rgb(28, 29, 31);
    style.visuals.window_fill = egui::Color32::from_rgb(35, 36, 38);
    style.visuals.faint_bg_color = egui::Color32::from_rgb(44, 45, 48);
    style.visuals.selection.bg_fill = egui::Color32::from_rgb(66, 133, 244);

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);

    ctx.set_style(style);
}
