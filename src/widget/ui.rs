use super::state::stage_messages;
use super::{UploadStatus, UploadWidget, WidgetState};
use crate::upload::{FilePreview, ACCEPTED_EXTENSIONS};
use eframe::egui::{self, Color32, RichText};
use rfd::FileDialog;

const AMBER: Color32 = Color32::from_rgb(245, 166, 35);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
const DESTRUCTIVE: Color32 = Color32::from_rgb(220, 50, 50);

impl UploadWidget {
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let busy = self.is_uploading();

        ui.horizontal(|ui| {
            let upload_button =
                egui::Button::new("📤 Upload Loan File").min_size(egui::vec2(160.0, 32.0));
            if ui.add_enabled(!busy, upload_button).clicked() {
                if let Some(path) = FileDialog::new()
                    .add_filter("Loan documents", &ACCEPTED_EXTENSIONS)
                    .pick_file()
                {
                    self.select_file(path);
                }
            }
            if let WidgetState::Uploading(upload) = &self.state {
                ui.add(egui::Spinner::new());
                ui.label(RichText::new(&upload.file_name).weak());
            }

            ui.add_space(8.0);
            if ui
                .add_enabled(!busy, egui::Button::new("📄 Load Sample Loan"))
                .clicked()
            {
                self.load_sample();
            }
        });

        if let Some(preview) = self.state.preview() {
            ui.add_space(10.0);
            Self::render_analysis(ui, preview, self.state.progress());
        }

        if !busy {
            match self.status() {
                UploadStatus::Success(message) => {
                    ui.add_space(10.0);
                    Self::render_banner(ui, "✅", &message, SUCCESS);
                }
                UploadStatus::Error(message) => {
                    ui.add_space(10.0);
                    Self::render_banner(ui, "❌", &message, DESTRUCTIVE);
                }
                UploadStatus::None => {}
            }
        }
    }

    pub fn show_toasts(&mut self, ctx: &egui::Context) {
        self.toasts.show(ctx);
    }

    fn render_analysis(ui: &mut egui::Ui, preview: &FilePreview, progress: f32) {
        egui::Frame::none()
            .fill(AMBER.gamma_multiply(0.08))
            .stroke(egui::Stroke::new(1.0, AMBER.gamma_multiply(0.4)))
            .rounding(6.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚡").color(AMBER));
                    ui.label(RichText::new("AI Analyzing...").strong());
                });
                ui.add_space(6.0);

                egui::Grid::new("file_preview")
                    .num_columns(2)
                    .spacing([24.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("FILE").small().weak());
                        ui.label(RichText::new("SIZE").small().weak());
                        ui.end_row();
                        ui.add(
                            egui::Label::new(RichText::new(&preview.file_name).monospace())
                                .truncate(true),
                        );
                        ui.label(RichText::new(&preview.file_size).monospace());
                        ui.end_row();
                    });

                ui.add_space(4.0);
                ui.label(RichText::new("CONTENT PREVIEW").small().weak());
                ui.label(RichText::new(&preview.snippet).monospace().small());
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new("CONVERSION PROGRESS").small().weak());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("{}%", progress.round() as u32))
                                .monospace()
                                .strong()
                                .color(AMBER),
                        );
                    });
                });
                ui.add(egui::ProgressBar::new(progress / 100.0).fill(AMBER));

                ui.add_space(4.0);
                for stage in stage_messages(progress) {
                    ui.label(RichText::new(format!("• {stage}")).small().weak());
                }
            });
    }

    fn render_banner(ui: &mut egui::Ui, icon: &str, message: &str, color: Color32) {
        egui::Frame::none()
            .fill(color.gamma_multiply(0.1))
            .stroke(egui::Stroke::new(1.0, color.gamma_multiply(0.3)))
            .rounding(6.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(icon);
                    ui.colored_label(color, message);
                });
            });
    }
}
