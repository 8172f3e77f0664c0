mod file_processor;
mod service;
mod types;

pub use file_processor::{FileProcessor, ACCEPTED_EXTENSIONS};
pub use service::{ConversionService, HttpConversionService};
pub use types::{sample_loan, ConvertedLoan, FilePreview, LoanData};

#[cfg(test)]
pub use types::ConversionRequest;
