//! `plastcustom-ai`
//!
//! **Responsibility:** restock predictions for a client's bale stock.
//!
//! - Reads `Client`/`StockRecord` snapshots; never mutates them.
//! - One outbound generative-model call per prediction, with a JSON response
//!   schema the reply must satisfy.
//! - Ordinary failures degrade to a deterministic fallback result. Only a
//!   rejected credential ("Requested entity was not found.") reaches the caller.

pub mod config;
pub mod credentials;
pub mod fallback;
pub mod gemini;
pub mod model;
pub mod prompt;
pub mod result;
pub mod service;

pub use config::{AiConfig, ConfigError};
pub use credentials::{ApiKey, CredentialPicker, StaticCredential};
pub use gemini::GeminiClient;
pub use model::{CREDENTIAL_NOT_FOUND_MARKER, GenerateRequest, ModelClient, ModelError};
pub use result::{AiError, PredictionResult};
pub use service::PredictionService;
