use super::LoanDesk;
use crate::upload::LoanData;
use eframe::egui::{self, RichText};

impl LoanDesk {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Loan Uploader");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Convert loan documents to LoanJSON")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });
                ui.add_space(20.0);

                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    self.widget.show(ui);
                });

                ui.add_space(20.0);

                if let Some(loan) = self.loaded_loan() {
                    ui.group(|ui| {
                        ui.set_width(ui.available_width());
                        Self::render_loan(ui, &loan);
                    });
                }

                ui.add_space(10.0);
                ui.label(
                    RichText::new(format!("Conversion endpoint: {}", self.endpoint))
                        .small()
                        .weak(),
                );
            });
        });
    }

    fn render_loan(ui: &mut egui::Ui, loan: &LoanData) {
        ui.label(RichText::new(format!("Loan {}", loan.loan_id)).strong());
        ui.add_space(6.0);

        egui::Grid::new("loan_summary")
            .num_columns(2)
            .spacing([24.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                let mut row = |label: &str, value: String| {
                    ui.label(RichText::new(label).weak());
                    ui.label(RichText::new(value).monospace());
                    ui.end_row();
                };

                row("Borrower", loan.borrower_name.clone());
                row("Principal", format!("{:.2}", loan.principal));
                row("Interest rate", format!("{:.3}%", loan.interest_rate));
                row("Term", format!("{} months", loan.term_months));
                if let Some(payment) = loan.monthly_payment() {
                    row("Monthly payment", format!("{payment:.2}"));
                }

                let optional = [
                    ("Start date", &loan.start_date),
                    ("Payment frequency", &loan.payment_frequency),
                    ("Loan type", &loan.loan_type),
                    ("Lender", &loan.lender),
                    ("Collateral", &loan.collateral),
                ];
                for (label, value) in optional {
                    if let Some(value) = value {
                        row(label, value.clone());
                    }
                }
                if !loan.extra.is_empty() {
                    row("Other fields", loan.extra.len().to_string());
                }
            });
    }
}
