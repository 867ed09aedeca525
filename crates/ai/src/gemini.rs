//! Google Gemini `generateContent` client with a JSON response schema.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::config::AiConfig;
use crate::credentials::ApiKey;
use crate::model::{CREDENTIAL_NOT_FOUND_MARKER, GenerateRequest, ModelClient, ModelError};

const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a JsonValue,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, ModelError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, model: &str) -> String {
        generate_url(&self.endpoint, model)
    }
}

fn generate_url(endpoint: &str, model: &str) -> String {
    format!("{endpoint}/v1beta/models/{model}:generateContent")
}

fn request_body(request: &GenerateRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: &request.prompt,
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: &request.response_schema,
        },
    }
}

/// Concatenated text of the first candidate, `None` when there is none.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let text: String = response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() { None } else { Some(text) }
}

/// Provider error message, or a bounded preview of the raw body.
///
/// The credential marker is looked for in the whole body, so it survives
/// truncation of unstructured error pages.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.contains(CREDENTIAL_NOT_FOUND_MARKER) => {
            CREDENTIAL_NOT_FOUND_MARKER.to_string()
        }
        Err(_) => body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: &GenerateRequest,
    ) -> Result<Option<String>, ModelError> {
        let response = self
            .http
            .post(self.url(&request.model))
            .header(API_KEY_HEADER, api_key.expose())
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout
                } else {
                    ModelError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let data: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Envelope(e.to_string()))?;

        Ok(extract_text(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::response_schema;
    use serde_json::json;

    #[test]
    fn url_targets_generate_content() {
        assert_eq!(
            generate_url("https://generativelanguage.googleapis.com", "gemini-3-pro-preview"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[test]
    fn client_strips_trailing_slash() {
        let config = AiConfig {
            endpoint: "http://localhost:9000/".to_string(),
            ..AiConfig::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.url("m"),
            "http://localhost:9000/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn request_body_carries_prompt_and_schema() {
        let request = GenerateRequest {
            model: "m".to_string(),
            prompt: "analise".to_string(),
            response_schema: response_schema(),
        };
        let body = serde_json::to_value(request_body(&request)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "analise");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], response_schema());
    }

    #[test]
    fn extracts_text_from_first_candidate() {
        let raw = json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(extract_text(response).as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn missing_candidates_yield_none() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(extract_text(response), None);

        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": []}}]})).unwrap();
        assert_eq!(extract_text(response), None);
    }

    #[test]
    fn error_message_reads_provider_envelope() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        let err = ModelError::Api {
            status: 404,
            message: error_message(body),
        };
        assert!(err.to_string().contains(CREDENTIAL_NOT_FOUND_MARKER));
        assert!(err.is_credential_failure());
    }

    #[test]
    fn error_message_truncates_unstructured_bodies() {
        let body = "é".repeat(500);
        assert_eq!(error_message(&body).chars().count(), ERROR_BODY_PREVIEW_CHARS);
    }

    #[test]
    fn marker_past_the_preview_still_marks_a_credential_failure() {
        let body = format!(
            "<html><body>{}<p>{CREDENTIAL_NOT_FOUND_MARKER}</p></body></html>",
            "x".repeat(ERROR_BODY_PREVIEW_CHARS * 2)
        );
        let err = ModelError::Api {
            status: 404,
            message: error_message(&body),
        };
        assert!(err.is_credential_failure());
        assert!(err.to_string().len() < body.len());
    }
}
