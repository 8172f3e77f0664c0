use crate::config::UploaderConfig;
use crate::error::UploadError;
use crate::upload::types::{ConversionRequest, ConvertedLoan, LoanData};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Turns a raw loan document into a [`LoanData`] record.
#[async_trait]
pub trait ConversionService: Send + Sync {
    async fn convert(&self, request: ConversionRequest) -> Result<ConvertedLoan, UploadError>;
}

#[derive(Debug, Deserialize)]
struct ConversionResponse {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ConversionResponse {
    fn into_result(self) -> Result<ConvertedLoan, UploadError> {
        if !self.success {
            return Err(UploadError::rejected(self.error));
        }
        let data = self
            .data
            .filter(|d| !d.is_null())
            .ok_or_else(|| UploadError::MalformedResponse("success without data".to_string()))?;
        let message = self
            .message
            .ok_or_else(|| UploadError::MalformedResponse("success without message".to_string()))?;

        Ok(ConvertedLoan {
            data: LoanData::from_value(data)?,
            message,
        })
    }
}

/// Reads a response body. The status code only matters when the body
/// is not JSON.
fn parse_response(status: StatusCode, body: &str) -> Result<ConvertedLoan, UploadError> {
    match serde_json::from_str::<ConversionResponse>(body) {
        Ok(response) => response.into_result(),
        Err(_) if !status.is_success() => Err(UploadError::HttpStatus(status.as_u16())),
        Err(e) => Err(UploadError::MalformedResponse(format!(
            "response is not valid JSON: {e}"
        ))),
    }
}

#[derive(Clone)]
pub struct HttpConversionService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpConversionService {
    pub fn new(config: &UploaderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ConversionService for HttpConversionService {
    async fn convert(&self, request: ConversionRequest) -> Result<ConvertedLoan, UploadError> {
        debug!(
            endpoint = %self.endpoint,
            file_name = %request.file_name,
            bytes = request.content.len(),
            "sending conversion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        debug!(%status, bytes = body.len(), "conversion response received");
        parse_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::types::sample_loan;
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn loan_json() -> Value {
        serde_json::to_value(sample_loan()).unwrap()
    }

    #[test]
    fn success_response() {
        let body = json!({"success": true, "data": loan_json(), "message": "Converted!"});
        let converted = parse_response(StatusCode::OK, &body.to_string()).unwrap();
        assert_eq!(converted.message, "Converted!");
        assert_eq!(converted.data, sample_loan());
    }

    #[test]
    fn failure_surfaces_service_error() {
        let body = json!({"success": false, "error": "bad format"});
        let err = parse_response(StatusCode::OK, &body.to_string()).unwrap_err();
        assert_eq!(err.to_string(), "bad format");
    }

    #[test]
    fn failure_without_error_uses_default() {
        let body = json!({"success": false});
        let err = parse_response(StatusCode::UNPROCESSABLE_ENTITY, &body.to_string()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid or unsupported loan document");
    }

    #[test]
    fn success_without_data_or_message_is_malformed() {
        let body = json!({"success": true, "message": "ok"});
        let err = parse_response(StatusCode::OK, &body.to_string()).unwrap_err();
        assert!(matches!(err, UploadError::MalformedResponse(_)));

        let body = json!({"success": true, "data": loan_json()});
        let err = parse_response(StatusCode::OK, &body.to_string()).unwrap_err();
        assert!(matches!(err, UploadError::MalformedResponse(_)));
    }

    #[test]
    fn success_with_off_schema_data_is_malformed() {
        let body = json!({"success": true, "data": {"foo": 1}, "message": "ok"});
        let err = parse_response(StatusCode::OK, &body.to_string()).unwrap_err();
        assert!(matches!(err, UploadError::MalformedResponse(_)));
    }

    #[test]
    fn non_json_body() {
        let err = parse_response(StatusCode::BAD_GATEWAY, "<html>502</html>").unwrap_err();
        assert_eq!(err.to_string(), "Upload failed with status: 502");

        let err = parse_response(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, UploadError::MalformedResponse(_)));
    }

    /// Serves one canned HTTP response and hands back the request it saw.
    async fn serve_once(body: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(split) = text.find("\r\n\r\n") {
                    let content_length = text[..split]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= split + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (format!("http://{addr}/api/convert-loan"), handle)
    }

    #[tokio::test]
    async fn http_service_posts_json_and_parses_reply() {
        let reply = json!({"success": true, "data": loan_json(), "message": "Converted!"});
        let (endpoint, server) = serve_once(reply.to_string()).await;

        let config = UploaderConfig {
            endpoint,
            request_timeout: Duration::from_secs(5),
            ..UploaderConfig::default()
        };
        let service = HttpConversionService::new(&config).unwrap();
        let converted = service
            .convert(ConversionRequest {
                content: "Borrower: Ada".into(),
                file_name: "loan.txt".into(),
                file_type: "text/plain".into(),
            })
            .await
            .unwrap();
        assert_eq!(converted.message, "Converted!");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/convert-loan"), "got: {request}");
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.contains("\"fileName\":\"loan.txt\""), "got: {request}");
        assert!(request.contains("\"fileType\":\"text/plain\""));
        assert!(request.contains("\"content\":\"Borrower: Ada\""));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = UploaderConfig {
            endpoint: format!("http://{addr}/api/convert-loan"),
            request_timeout: Duration::from_secs(5),
            ..UploaderConfig::default()
        };
        let service = HttpConversionService::new(&config).unwrap();
        let err = service
            .convert(ConversionRequest {
                content: String::new(),
                file_name: "loan.txt".into(),
                file_type: "text/plain".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Transport(_)), "got: {err}");
    }
}
