//! AI adapter module. Implements TextCompletionPort for the model service.
//!
//! Provides the Gemini adapter and a mock adapter for tests/offline runs.

pub mod gemini_adapter;
pub mod mock_adapter;

pub use gemini_adapter::GeminiAdapter;
pub use mock_adapter::MockCompletionAdapter;
