mod ui;

use crate::config::UploaderConfig;
use crate::upload::{ConversionService, LoanData};
use crate::widget::UploadWidget;
use eframe::{egui, App};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::info;

pub struct LoanDesk {
    // Declared before the runtime so its tasks are aborted first.
    widget: UploadWidget,
    loaded: Rc<RefCell<Option<LoanData>>>,
    endpoint: String,
    _runtime: Runtime,
}

impl LoanDesk {
    pub fn new(
        runtime: Runtime,
        service: Arc<dyn ConversionService>,
        config: UploaderConfig,
    ) -> Self {
        info!(endpoint = %config.endpoint, "initializing loan desk");

        let loaded = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&loaded);
        let endpoint = config.endpoint.clone();
        let widget = UploadWidget::new(
            config,
            runtime.handle().clone(),
            service,
            Box::new(move |loan: LoanData| {
                info!(loan_id = %loan.loan_id, borrower = %loan.borrower_name, "loan loaded");
                *sink.borrow_mut() = Some(loan);
            }),
        );

        Self {
            widget,
            loaded,
            endpoint,
            _runtime: runtime,
        }
    }

    pub fn loaded_loan(&self) -> Option<LoanData> {
        self.loaded.borrow().clone()
    }
}

impl App for LoanDesk {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.widget.poll_events() {
            ctx.request_repaint();
        }
        if self.widget.is_uploading() {
            // background events only arrive on the next frame
            ctx.request_repaint_after(Duration::from_millis(50));
        }
        self.render(ctx);
        self.widget.show_toasts(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadError;
    use crate::upload::{sample_loan, ConversionRequest, ConvertedLoan};
    use async_trait::async_trait;

    struct Offline;

    #[async_trait]
    impl ConversionService for Offline {
        async fn convert(&self, _: ConversionRequest) -> Result<ConvertedLoan, UploadError> {
            Err(UploadError::Transport("offline".into()))
        }
    }

    #[test]
    fn sample_reaches_the_summary_panel() {
        let runtime = Runtime::new().unwrap();
        let mut desk = LoanDesk::new(runtime, Arc::new(Offline), UploaderConfig::default());
        assert!(desk.loaded_loan().is_none());

        desk.widget.load_sample();
        assert_eq!(desk.loaded_loan(), Some(sample_loan()));
    }
}
