use crate::error::UploadError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A converted loan record ("LoanJSON").
///
/// Keys the schema does not name are kept in `extra` so nothing the
/// service returns is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanData {
    pub loan_id: String,
    pub borrower_name: String,
    pub principal: f64,
    /// Nominal annual rate, in percent.
    pub interest_rate: f64,
    pub term_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoanData {
    /// Parses and validates the `data` field of a conversion response.
    pub fn from_value(value: Value) -> Result<Self, UploadError> {
        let loan: LoanData = serde_json::from_value(value).map_err(|e| {
            UploadError::MalformedResponse(format!("loan data does not match schema: {e}"))
        })?;
        loan.validate()?;
        Ok(loan)
    }

    fn validate(&self) -> Result<(), UploadError> {
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(UploadError::MalformedResponse(format!(
                "principal must be a non-negative amount, got {}",
                self.principal
            )));
        }
        if !self.interest_rate.is_finite() || self.interest_rate < 0.0 {
            return Err(UploadError::MalformedResponse(format!(
                "interest rate must be a non-negative percentage, got {}",
                self.interest_rate
            )));
        }
        Ok(())
    }

    /// Level payment of a fully amortising loan. `None` for a zero term.
    pub fn monthly_payment(&self) -> Option<f64> {
        if self.term_months == 0 {
            return None;
        }
        let n = self.term_months as f64;
        let r = self.interest_rate / 1200.0;
        if r == 0.0 {
            return Some(self.principal / n);
        }
        Some(self.principal * r / (1.0 - (1.0 + r).powf(-n)))
    }
}

/// The fixed demo loan behind "Load Sample Loan".
pub fn sample_loan() -> LoanData {
    LoanData {
        loan_id: "LN-2024-00142".to_string(),
        borrower_name: "Harbor Street Holdings LLC".to_string(),
        principal: 250_000.0,
        interest_rate: 6.75,
        term_months: 360,
        start_date: Some("2024-03-01".to_string()),
        payment_frequency: Some("monthly".to_string()),
        loan_type: Some("Commercial Real Estate".to_string()),
        lender: Some("First Meridian Bank".to_string()),
        collateral: Some("1420 Harbor Street, Unit 3".to_string()),
        extra: Map::new(),
    }
}

/// Quick facts about the file being converted, shown while the service works.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePreview {
    pub file_name: String,
    pub file_type: String,
    pub file_size: String,
    pub line_count: usize,
    pub snippet: String,
}

/// Body of the conversion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub content: String,
    pub file_name: String,
    pub file_type: String,
}

/// A successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedLoan {
    pub data: LoanData,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_camel_case_and_keeps_unknown_keys() {
        let loan = LoanData::from_value(json!({
            "loanId": "L-1",
            "borrowerName": "Ada",
            "principal": 1000,
            "interestRate": 5.5,
            "termMonths": 12,
            "lender": "Bank",
            "escrow": {"monthly": 120}
        }))
        .unwrap();

        assert_eq!(loan.loan_id, "L-1");
        assert_eq!(loan.principal, 1000.0);
        assert_eq!(loan.lender.as_deref(), Some("Bank"));
        assert_eq!(loan.extra.get("escrow"), Some(&json!({"monthly": 120})));

        let back = serde_json::to_value(&loan).unwrap();
        assert_eq!(back["escrow"]["monthly"], 120);
        assert_eq!(back["borrowerName"], "Ada");
        assert!(back.get("collateral").is_none());
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let err = LoanData::from_value(json!({"loanId": "L-1"})).unwrap_err();
        assert!(matches!(err, UploadError::MalformedResponse(_)), "got: {err}");
    }

    #[test]
    fn negative_principal_is_malformed() {
        let err = LoanData::from_value(json!({
            "loanId": "L-1",
            "borrowerName": "Ada",
            "principal": -5,
            "interestRate": 5,
            "termMonths": 12
        }))
        .unwrap_err();
        assert!(err.to_string().contains("principal"), "got: {err}");
    }

    #[test]
    fn monthly_payment_amortises() {
        let loan = sample_loan();
        let payment = loan.monthly_payment().unwrap();
        // 250k over 30 years at 6.75%
        assert!((payment - 1621.50).abs() < 0.5, "got: {payment}");
    }

    #[test]
    fn monthly_payment_edge_cases() {
        let mut loan = sample_loan();
        loan.interest_rate = 0.0;
        loan.term_months = 100;
        assert_eq!(loan.monthly_payment(), Some(2500.0));

        loan.term_months = 0;
        assert_eq!(loan.monthly_payment(), None);
    }

    #[test]
    fn sample_loan_round_trips_through_schema() {
        let value = serde_json::to_value(sample_loan()).unwrap();
        assert_eq!(LoanData::from_value(value).unwrap(), sample_loan());
    }

    #[test]
    fn request_uses_camel_case_keys() {
        let request = ConversionRequest {
            content: "text".into(),
            file_name: "loan.txt".into(),
            file_type: "text/plain".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"content": "text", "fileName": "loan.txt", "fileType": "text/plain"})
        );
    }
}
