use crate::config::{AxisScale, PlotConfig, Theme, DEFAULT_LOG_BASE};
use crate::ingest;
use crate::models::{ErrorBarKind, LongRecord, Statistic, WideTable};
use crate::ui::plot_view::{self, ChartData};
use crate::ui::table_window::{TableAction, TableWindow};
use crate::ui::themes;
use eframe::egui;

pub struct ClipPlotApp {
    config: PlotConfig,
    chart: Option<ChartData>,
    /// Singleton table window: created on first plot, reseeded afterwards.
    table_window: Option<TableWindow>,
    status_message: String,
}

impl ClipPlotApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = PlotConfig::default();
        themes::apply_theme(&cc.egui_ctx, &config.theme);

        Self {
            config,
            chart: None,
            table_window: None,
            status_message: "Copy a table to the clipboard and press Generate Plot".to_string(),
        }
    }

    /// "Generate Plot": fresh clipboard snapshot → reshape → render, and
    /// show the same snapshot in the table window.
    fn generate_plot(&mut self) {
        match ingest::read_clipboard_table() {
            Ok(table) => {
                let records = table.melt();
                self.rebuild_chart(&records, "clipboard");
                self.display_table(&table);
            }
            Err(err) => {
                self.status_message = format!("Clipboard ingest failed: {err}");
                tracing::warn!(error = %err, "clipboard ingest failed");
            }
        }
    }

    /// "Generate Plot from Table": re-plots from the edited table contents
    /// without touching the clipboard.
    fn replot_from_table(&mut self, table: &WideTable) {
        let records = table.melt();
        self.rebuild_chart(&records, "table");
    }

    fn rebuild_chart(&mut self, records: &[LongRecord], source: &str) {
        let mut note = String::new();
        if self.config.y_scale == AxisScale::Logarithmic {
            let (base, fell_back) = self.config.effective_log_base();
            if fell_back {
                tracing::warn!(
                    input = %self.config.log_base,
                    fallback = base,
                    "log base does not parse, using fallback"
                );
                note = format!(" — invalid log base {:?}, using {}", self.config.log_base, base);
            }
        }

        let chart = plot_view::build_chart(records, &self.config);
        self.status_message = format!(
            "Plotted {} values in {} groups from the {}{}",
            chart.total_points(),
            chart.groups.len(),
            source,
            note
        );
        tracing::info!(
            groups = chart.groups.len(),
            points = chart.total_points(),
            source,
            "chart rebuilt"
        );
        self.chart = Some(chart);
    }

    fn display_table(&mut self, table: &WideTable) {
        match &mut self.table_window {
            Some(window) => window.display(table),
            None => self.table_window = Some(TableWindow::new(table)),
        }
    }

    fn render_options_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Plot Options");
        ui.separator();

        ui.group(|ui| {
            ui.label("Aggregation");
            egui::ComboBox::from_label("Statistic")
                .selected_text(self.config.statistic.to_string())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.config.statistic, Statistic::Mean, "Mean");
                    ui.selectable_value(&mut self.config.statistic, Statistic::Median, "Median");
                });

            egui::ComboBox::from_label("Error bars")
                .selected_text(self.config.error_bar.to_string())
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.config.error_bar,
                        ErrorBarKind::StandardError,
                        "SEM",
                    );
                    ui.selectable_value(
                        &mut self.config.error_bar,
                        ErrorBarKind::StandardDeviation,
                        "SD",
                    );
                });
        });

        ui.add_space(8.0);

        ui.group(|ui| {
            ui.label("Y-axis scale");
            ui.radio_value(&mut self.config.y_scale, AxisScale::Linear, "Linear");
            ui.radio_value(
                &mut self.config.y_scale,
                AxisScale::Logarithmic,
                "Logarithmic",
            );

            ui.horizontal(|ui| {
                ui.label("Log base:");
                ui.add_enabled(
                    self.config.y_scale == AxisScale::Logarithmic,
                    egui::TextEdit::singleline(&mut self.config.log_base).desired_width(60.0),
                );
            });

            if self.config.y_scale == AxisScale::Logarithmic
                && self.config.parsed_log_base().is_none()
            {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    format!("Invalid base, {} will be used", DEFAULT_LOG_BASE),
                );
            }
        });

        ui.add_space(12.0);

        if ui
            .add(egui::Button::new("Generate Plot").min_size(egui::vec2(150.0, 30.0)))
            .clicked()
        {
            self.generate_plot();
        }

        ui.add_space(16.0);
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Theme:");
            ui.radio_value(&mut self.config.theme, Theme::Light, "Light");
            ui.radio_value(&mut self.config.theme, Theme::Dark, "Dark");
        });

        if let Some(chart) = &self.chart {
            ui.add_space(16.0);
            ui.separator();
            ui.label("Current plot");
            ui.label(format!("Groups: {}", chart.groups.len()));
            ui.label(format!("Points: {}", chart.total_points()));
        }
    }
}

impl eframe::App for ClipPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        themes::apply_theme(ctx, &self.config.theme);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.add_space(2.0);
            ui.label(&self.status_message);
            ui.add_space(2.0);
        });

        egui::SidePanel::left("options_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_options_panel(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| match &self.chart {
            Some(chart) => plot_view::render(ui, chart),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        "Copy a wide-format table (header row, one column per group)\n\
                         to the clipboard, then press Generate Plot.",
                    );
                });
            }
        });

        let action = match &mut self.table_window {
            Some(window) => window.show(ctx),
            None => TableAction::None,
        };
        if let TableAction::PlotRequested(table) = action {
            self.replot_from_table(&table);
        }
    }
}
