use anyhow::Result;
use eframe::egui;

use clipplot::ui::ClipPlotApp;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Clipboard Bar Plotter")
            .with_inner_size([900.0, 620.0])
            .with_min_inner_size([640.0, 420.0]),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "Clipboard Bar Plotter",
        options,
        Box::new(|cc| {
            configure_fonts(&cc.egui_ctx);
            Ok(Box::new(ClipPlotApp::new(cc)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}

fn configure_fonts(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(14.0));
    style
        .text_styles
        .insert(egui::TextStyle::Button, egui::FontId::proportional(14.0));
    style
        .text_styles
        .insert(egui::TextStyle::Heading, egui::FontId::proportional(18.0));
    ctx.set_style(style);
}
