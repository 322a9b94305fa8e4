// src/ui/dashboard.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

use crate::report::{AnalysisResult, SummaryLanguage};
use crate::state::AppState;

/// Button presses that need app-level services (file dialogs, HTTP workers,
/// the narrator) and therefore bubble up to the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    PickFile,
    Analyze,
    VoiceSummary,
    ExportPdf,
}

pub fn show_dashboard_view(ui: &mut egui::Ui, state: &mut AppState) -> Option<DashboardAction> {
    let mut action = None;

    ui.heading("📊 SME Financial Health Dashboard");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui.button("Choose File…").clicked() {
            action = Some(DashboardAction::PickFile);
        }

        match &state.selected_file {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(name);
            }
            None => {
                ui.weak("No file selected (csv / xlsx / pdf)");
            }
        }

        let analyze_label = if state.loading { "Analyzing…" } else { "Analyze" };
        if ui
            .add_enabled(!state.loading, egui::Button::new(analyze_label))
            .clicked()
        {
            action = Some(DashboardAction::Analyze);
        }
    });

    // Result views are gated solely on the presence of an analysis result.
    if let Some(result) = state.result.clone() {
        ui.add_space(12.0);
        show_metric_cards(ui, &result);

        ui.add_space(12.0);
        show_income_expense_chart(ui, &result);

        ui.add_space(12.0);
        ui.heading("🤖 AI Summary");
        ui.horizontal(|ui| {
            for language in SummaryLanguage::ALL {
                if ui
                    .selectable_label(state.summary_language == language, language.label())
                    .clicked()
                {
                    state.summary_language = language;
                }
            }
        });
        ui.add_space(4.0);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(result.summary_for(state.summary_language));
        });
        if ui.button("🔊 Voice Summary").clicked() {
            action = Some(DashboardAction::VoiceSummary);
        }

        ui.add_space(12.0);
        show_loan_recommendation(ui, &result);

        ui.add_space(12.0);
        let export_label = if state.exporting {
            "Exporting…"
        } else {
            "📄 Download PDF Report"
        };
        if ui
            .add_enabled(!state.exporting, egui::Button::new(export_label))
            .clicked()
        {
            action = Some(DashboardAction::ExportPdf);
        }
    }

    action
}

fn show_metric_cards(ui: &mut egui::Ui, result: &AnalysisResult) {
    let metrics = &result.investor_metrics;
    let cards = [
        ("💰 Income", metrics.total_income, egui::Color32::DARK_GREEN),
        ("💸 Expense", metrics.total_expense, egui::Color32::DARK_RED),
        ("📈 Profit", metrics.net_profit, egui::Color32::DARK_BLUE),
        ("🏦 Credit", metrics.credit_score, egui::Color32::from_rgb(88, 24, 128)),
    ];

    ui.horizontal_wrapped(|ui| {
        for (label, value, color) in cards {
            ui.group(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(label).color(color).strong());
                    ui.label(egui::RichText::new(format!("₹{value}")).size(20.0));
                });
            });
        }
    });
}

fn show_income_expense_chart(ui: &mut egui::Ui, result: &AnalysisResult) {
    let bars: Vec<Bar> = result
        .chart_series()
        .iter()
        .enumerate()
        .map(|(i, (category, value))| Bar::new(i as f64, *value).width(0.5).name(*category))
        .collect();

    Plot::new("income_expense_chart")
        .height(240.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Income vs Expense"));
        });
}

fn show_loan_recommendation(ui: &mut egui::Ui, result: &AnalysisResult) {
    let loan = &result.loan_recommendation;

    ui.heading("🏦 Loan Recommendation");
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        egui::Grid::new("loan_grid")
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.label("Eligibility:");
                ui.strong(if loan.eligible { "Eligible" } else { "Not eligible" });
                ui.end_row();

                ui.label("Amount:");
                ui.strong(format!("₹{}", loan.recommended_amount));
                ui.end_row();

                ui.label("Tenure:");
                ui.strong(format!("{} months", loan.tenure_months));
                ui.end_row();

                ui.label("Risk Level:");
                ui.strong(loan.risk_level.as_str());
                ui.end_row();
            });
    });
}
