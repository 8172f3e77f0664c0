use eframe::egui::{self, Align2, Color32, RichText};
use std::time::{Duration, Instant};

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    created: Instant,
}

/// Short-lived notifications stacked in the bottom-right corner.
#[derive(Debug, Default)]
pub struct Toasts {
    pub(super) items: Vec<Toast>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        self.items.push(Toast {
            kind,
            message,
            created: Instant::now(),
        });
    }

    pub fn prune(&mut self, now: Instant) {
        self.items
            .retain(|t| now.saturating_duration_since(t.created) < TOAST_LIFETIME);
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Instant::now());
        if self.items.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                for toast in &self.items {
                    let (icon, color) = match toast.kind {
                        ToastKind::Success => ("✅", Color32::from_rgb(0, 180, 0)),
                        ToastKind::Error => ("❌", Color32::from_rgb(220, 50, 50)),
                    };
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(icon);
                            ui.label(RichText::new(&toast.message).color(color));
                        });
                    });
                    ui.add_space(4.0);
                }
            });

        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
