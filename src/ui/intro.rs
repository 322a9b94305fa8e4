// src/ui/intro.rs
use eframe::egui;

use crate::state::intro::UiPhase;

/// Splash screen shown until the sequencer reaches `Main`: the collapsed
/// brand mark first, the full title once the expand deadline fires.
pub fn show_intro_view(ui: &mut egui::Ui, phase: UiPhase) {
    ui.centered_and_justified(|ui| match phase {
        UiPhase::Intro => {
            ui.label(
                egui::RichText::new("SME")
                    .size(72.0)
                    .strong()
                    .color(egui::Color32::from_rgb(229, 9, 20)),
            );
        }
        UiPhase::Expanded | UiPhase::Main => {
            ui.label(
                egui::RichText::new("SME VISION")
                    .size(96.0)
                    .strong()
                    .color(egui::Color32::from_rgb(229, 9, 20)),
            );
        }
    });
}
