use eframe::egui::{self, RichText, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Output path, dataset summary and series toggles.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if let Some(output) = &state.output {
            ui.label(RichText::new(format!("Saved: {}", output.display())).strong());
            ui.separator();
        }

        ui.label(state.summary());
        ui.separator();

        let expected = RichText::new("Expected").color(state.colors.expected.to_color32());
        ui.checkbox(&mut state.show_expected, expected);

        let actual = RichText::new("Actual").color(state.colors.actual.to_color32());
        ui.checkbox(&mut state.show_actual, actual);
    });
}
