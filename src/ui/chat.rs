// src/ui/chat.rs
use eframe::egui;

use crate::chat::ChatRole;
use crate::state::AppState;

/// Transcript plus input row. Submission is handled entirely by the chat
/// session; transcript order is render order.
pub fn show_chat_view(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("💬 Ask AI");
    ui.add_space(4.0);

    egui::ScrollArea::vertical()
        .id_source("chat_window_scroll")
        .max_height(220.0)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in state.chat.transcript() {
                let (prefix, color) = match message.role {
                    ChatRole::User => ("You:", egui::Color32::LIGHT_BLUE),
                    ChatRole::Bot => ("Bot:", egui::Color32::LIGHT_GREEN),
                };
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(prefix).color(color).strong());
                    ui.label(&message.text);
                });
            }
        });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let input = ui.add(
            egui::TextEdit::singleline(&mut state.chat.pending_input)
                .hint_text("Ask about loan, EMI, risk...")
                .desired_width(ui.available_width() - 64.0),
        );

        let send_clicked = ui.button("Send").clicked();
        let enter_pressed =
            input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if send_clicked || enter_pressed {
            state.chat.submit();
            input.request_focus();
        }
    });
}
