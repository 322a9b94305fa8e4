// src/app.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use rfd::FileDialog;

use crate::backend::{AnalysisClient, ReportClient};
use crate::config::Settings;
use crate::error::DashboardError;
use crate::report::AnalysisResult;
use crate::speech::{CommandNarrator, Narration, Narrator};
use crate::state::intro::{self, IntroEvent, IntroSequencer, UiPhase};
use crate::state::AppState;
use crate::ui::{self, DashboardAction};

pub const REPORT_FILE_NAME: &str = "SME_Financial_Report.pdf";

pub struct SmeVisionApp {
    state: AppState,
    intro: IntroSequencer,
    narration: Narration,
    analysis_client: AnalysisClient,
    report_client: ReportClient,

    // In-flight worker channels, polled each frame.
    analysis_rx: Option<Receiver<Result<AnalysisResult, DashboardError>>>,
    export_rx: Option<Receiver<Result<Vec<u8>, DashboardError>>>,

    // Shared with the workers; set on teardown so a late response is
    // dropped instead of delivered to a dead view.
    cancel: Arc<AtomicBool>,
}

impl SmeVisionApp {
    pub fn new(settings: Settings) -> Self {
        let narrator = CommandNarrator::new(settings.speech_command.clone());
        Self::with_narrator(settings, Box::new(narrator))
    }

    pub fn with_narrator(settings: Settings, narrator: Box<dyn Narrator>) -> Self {
        Self {
            state: AppState::new(),
            intro: IntroSequencer::new(),
            narration: Narration::new(narrator),
            analysis_client: AnalysisClient::new(settings.backend_url.clone()),
            report_client: ReportClient::new(settings.backend_url),
            analysis_rx: None,
            export_rx: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    fn pick_file(&mut self) {
        let file_dialog = FileDialog::new()
            .add_filter("Financial documents", &["csv", "xlsx", "pdf"])
            .set_title("Select Financial Document");

        if let Some(path) = file_dialog.pick_file() {
            self.state.select_file(path);
        }
    }

    fn submit_analysis(&mut self) {
        match self.state.begin_analysis() {
            Ok(Some(file)) => {
                self.analysis_rx =
                    Some(self.analysis_client.spawn_analyze(file, self.cancel.clone()));
            }
            Ok(None) => {} // already loading
            Err(e) => {
                self.state.error_message = Some(e.to_string());
            }
        }
    }

    fn voice_summary(&mut self) {
        // Caller-side precondition: a result and a resolvable summary must
        // exist before the voice trigger is reachable.
        if let Some(text) = self.state.summary_text() {
            let text = text.to_string();
            self.narration
                .request(&text, self.state.summary_language.locale());
        }
    }

    fn export_report(&mut self) {
        match self.state.begin_export() {
            Ok(Some(result)) => {
                self.export_rx =
                    Some(self.report_client.spawn_export(result, self.cancel.clone()));
            }
            Ok(None) => {} // already exporting
            Err(e) => {
                self.state.error_message = Some(e.to_string());
            }
        }
    }

    fn save_report(&mut self, bytes: Vec<u8>) {
        let file_dialog = FileDialog::new()
            .add_filter("PDF files", &["pdf"])
            .set_file_name(REPORT_FILE_NAME)
            .set_title("Save Report");

        if let Some(path) = file_dialog.save_file() {
            if let Err(e) = std::fs::write(&path, &bytes) {
                self.state.error_message = Some(format!("Error saving report: {}", e));
            }
        }
    }

    fn handle_action(&mut self, action: DashboardAction) {
        match action {
            DashboardAction::PickFile => self.pick_file(),
            DashboardAction::Analyze => self.submit_analysis(),
            DashboardAction::VoiceSummary => self.voice_summary(),
            DashboardAction::ExportPdf => self.export_report(),
        }
    }

    fn poll_workers(&mut self) {
        if let Some(rx) = &self.analysis_rx {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.state.finish_analysis(outcome);
                    self.analysis_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    // Worker bailed without reporting; still leave loading.
                    self.state.finish_analysis(Err(
                        DashboardError::AnalysisRequestFailed("worker exited".to_string()),
                    ));
                    self.analysis_rx = None;
                }
            }
        }

        if let Some(rx) = &self.export_rx {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.export_rx = None;
                    if let Some(bytes) = self.state.finish_export(outcome) {
                        self.save_report(bytes);
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.export_rx = None;
                    self.state.finish_export(Err(DashboardError::ReportExportFailed(
                        "worker exited".to_string(),
                    )));
                }
            }
        }
    }
}

impl eframe::App for SmeVisionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_workers();

        let now = Instant::now();
        while let Some(event) = self.intro.tick(now) {
            match event {
                IntroEvent::ExpandTitle => {
                    self.narration
                        .request(intro::WELCOME_LINE, intro::WELCOME_LOCALE);
                }
                IntroEvent::EnterMain => {}
            }
        }
        if let Some(wait) = self.intro.next_deadline(now) {
            ctx.request_repaint_after(wait);
        }
        if self.analysis_rx.is_some() || self.export_rx.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        if self.intro.phase() != UiPhase::Main {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui::intro::show_intro_view(ui, self.intro.phase());
            });
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("dashboard_scroll")
                .show(ui, |ui| {
                    if let Some(action) = ui::dashboard::show_dashboard_view(ui, &mut self.state)
                    {
                        self.handle_action(action);
                    }

                    ui.add_space(16.0);
                    ui.separator();
                    ui.add_space(8.0);

                    ui::chat::show_chat_view(ui, &mut self.state);
                });
        });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }
}

impl Drop for SmeVisionApp {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::SeqCst);
        self.narration.cancel_all();
    }
}
