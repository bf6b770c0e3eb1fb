use eframe::egui::Ui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Results plot (central panel)
// ---------------------------------------------------------------------------

/// Render expected (solid) and actual (dashed) against the input.
pub fn results_plot(ui: &mut Ui, state: &ViewerState) {
    let results = &state.results;
    if results.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No rows to display");
        });
        return;
    }

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&state.config.title);
        if state.visible_series() == 0 {
            ui.label("All series hidden; tick one in the top bar");
        }
    });

    Plot::new("results_plot")
        .legend(Legend::default())
        .x_axis_label(state.config.x_label.as_str())
        .y_axis_label(state.config.y_label.as_str())
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if state.show_expected {
                let points: PlotPoints = results.expected_points().map(|(x, y)| [x, y]).collect();
                plot_ui.line(
                    Line::new(points)
                        .name("Expected")
                        .color(state.colors.expected.to_color32())
                        .width(2.0),
                );
            }

            if state.show_actual {
                let points: PlotPoints = results.actual_points().map(|(x, y)| [x, y]).collect();
                plot_ui.line(
                    Line::new(points)
                        .name("Actual")
                        .color(state.colors.actual.to_color32())
                        .style(LineStyle::dashed_loose())
                        .width(2.0),
                );
            }
        });
}
