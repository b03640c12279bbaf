//! Financial handler unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::Bytes,
        http::{HeaderMap, HeaderValue, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    use gateway_types::{
        FinancialRequest, FinancialResponse, OperationKind, PaymentProcessor, ProcessingContext,
        ProcessingError, ProcessorRegistry,
    };

    use crate::inbound::{AppState, HandlerSettings, REQUEST_ID_HEADER, process_operation};

    /// What the mock processor answers.
    #[derive(Clone)]
    pub enum Script {
        Approve(&'static str),
        Fail(ProcessingError),
        Stall,
    }

    /// Processor recording every call it receives.
    pub struct RecordingProcessor {
        script: Script,
        calls: Mutex<Vec<(OperationKind, FinancialRequest)>>,
    }

    impl RecordingProcessor {
        pub fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn calls(&self) -> Vec<(OperationKind, FinancialRequest)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentProcessor for RecordingProcessor {
        async fn process(
            &self,
            ctx: &ProcessingContext,
            req: FinancialRequest,
        ) -> Result<FinancialResponse, ProcessingError> {
            self.calls.lock().unwrap().push((ctx.operation, req));
            match &self.script {
                Script::Approve(code) => Ok(FinancialResponse::new(*code)),
                Script::Fail(err) => Err(err.clone()),
                Script::Stall => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(FinancialResponse::new("00"))
                }
            }
        }
    }

    pub fn state_with(processor: Arc<RecordingProcessor>, settings: HandlerSettings) -> Arc<AppState> {
        Arc::new(AppState {
            processors: ProcessorRegistry::uniform(processor),
            settings,
        })
    }

    pub fn valid_body() -> Value {
        json!({
            "mti": "0100",
            "processing_code": "000000",
            "amount": "1000",
            "entry_mode": "051",
            "track2": "4761739001010010=22122011758928889",
            "terminal_id": "T1",
            "merchant_id": "M1"
        })
    }

    async fn call(state: Arc<AppState>, kind: OperationKind, body: &[u8]) -> Response {
        process_operation(kind, state, HeaderMap::new(), Bytes::copy_from_slice(body)).await
    }

    async fn into_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Success path
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_valid_request_reaches_processor_once() {
        for kind in OperationKind::ALL {
            let processor = RecordingProcessor::new(Script::Approve("00"));
            let state = state_with(processor.clone(), HandlerSettings::default());
            let body = valid_body().to_string();

            let (status, json) = into_json(call(state, kind, body.as_bytes()).await).await;

            assert_eq!(status, StatusCode::OK, "{}", kind);
            assert_eq!(json, json!({ "response_code": "00" }));

            let calls = processor.calls();
            assert_eq!(calls.len(), 1, "{} should call the processor once", kind);
            assert_eq!(calls[0].0, kind);
            let expected: FinancialRequest = serde_json::from_value(valid_body()).unwrap();
            assert_eq!(calls[0].1, expected);
        }
    }

    #[tokio::test]
    async fn test_unknown_fields_are_ignored() {
        let processor = RecordingProcessor::new(Script::Approve("00"));
        let state = state_with(processor.clone(), HandlerSettings::default());
        let mut body = valid_body();
        body["currency"] = json!("986");

        let (status, _) = into_json(
            call(state, OperationKind::Authorization, body.to_string().as_bytes()).await,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(processor.calls().len(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Decode and validation failures
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_unformatted_body_for_every_kind() {
        for kind in OperationKind::ALL {
            for body in [&b"{\"mti\":\"0100\""[..], &b"not json"[..], &b""[..]] {
                let processor = RecordingProcessor::new(Script::Approve("00"));
                let state = state_with(processor.clone(), HandlerSettings::default());

                let (status, json) = into_json(call(state, kind, body).await).await;

                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(
                    json,
                    json!({ "status_code": 400, "message": "unformatted body", "details": null })
                );
                assert!(processor.calls().is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_missing_fields_for_every_kind() {
        for kind in OperationKind::ALL {
            let processor = RecordingProcessor::new(Script::Approve("00"));
            let state = state_with(processor.clone(), HandlerSettings::default());

            let (status, json) = into_json(call(state, kind, br#"{"mti":"0100"}"#).await).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["status_code"], 400);
            assert_eq!(json["message"], "invalid body");
            assert_eq!(
                json["details"],
                json!({
                    "processing_code": "processing_code is required",
                    "amount": "amount is required",
                    "entry_mode": "entry_mode is required",
                    "track2": "track2 is required",
                    "terminal_id": "terminal_id is required",
                    "merchant_id": "merchant_id is required"
                })
            );
            assert!(processor.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_single_missing_field_yields_single_entry() {
        let fields = [
            "mti",
            "processing_code",
            "amount",
            "entry_mode",
            "track2",
            "terminal_id",
            "merchant_id",
        ];

        for field in fields {
            let processor = RecordingProcessor::new(Script::Approve("00"));
            let state = state_with(processor, HandlerSettings::default());
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(field);

            let (status, json) = into_json(
                call(state, OperationKind::Cancellation, body.to_string().as_bytes()).await,
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            let details = json["details"].as_object().unwrap();
            assert_eq!(details.len(), 1);
            assert_eq!(details[field], format!("{} is required", field));
        }
    }

    #[tokio::test]
    async fn test_blank_field_is_missing() {
        let processor = RecordingProcessor::new(Script::Approve("00"));
        let state = state_with(processor, HandlerSettings::default());
        let mut body = valid_body();
        body["amount"] = json!("  ");

        let (status, json) =
            into_json(call(state, OperationKind::Reversal, body.to_string().as_bytes()).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["details"], json!({ "amount": "amount is required" }));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Processor failures
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_processor_error_text_is_returned() {
        for kind in OperationKind::ALL {
            let processor = RecordingProcessor::new(Script::Fail(ProcessingError::Internal(
                "switch offline".into(),
            )));
            let state = state_with(processor.clone(), HandlerSettings::default());

            let mut headers = HeaderMap::new();
            headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-7"));
            let response = process_operation(
                kind,
                state,
                headers,
                Bytes::from(valid_body().to_string()),
            )
            .await;
            let (status, json) = into_json(response).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                json,
                json!({
                    "status_code": 500,
                    "message": "switch offline",
                    "details": { "request_id": "req-7" }
                })
            );
            assert_eq!(processor.calls().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_processor_error_text_can_be_hidden() {
        let processor = RecordingProcessor::new(Script::Fail(ProcessingError::Unavailable(
            "10.0.0.7:5000 refused".into(),
        )));
        let settings = HandlerSettings {
            expose_internal_errors: false,
            ..HandlerSettings::default()
        };
        let state = state_with(processor, settings);

        let (status, json) = into_json(
            call(state, OperationKind::Authorization, valid_body().to_string().as_bytes()).await,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "internal error");
        assert!(json["details"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_slow_processor_hits_deadline() {
        let processor = RecordingProcessor::new(Script::Stall);
        let settings = HandlerSettings {
            request_timeout: Duration::from_millis(20),
            ..HandlerSettings::default()
        };
        let state = state_with(processor.clone(), settings);

        let (status, json) = into_json(
            call(state, OperationKind::PreAuthorization, valid_body().to_string().as_bytes()).await,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "deadline exceeded");
        assert_eq!(processor.calls().len(), 1);
    }
}
