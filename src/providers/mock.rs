/*!
 * Mock provider implementations for testing.
 *
 * This module provides a scripted provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with tagged text
 * - `MockProvider::echo()` - Returns the input unchanged
 * - `MockProvider::failing()` - Always fails with a connection error
 * - `MockProvider::rate_limited()` - Always fails with a 429
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::language_utils::LanguageCode;
use crate::providers::Provider;

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Source language
    pub source_language: LanguageCode,
    /// Target language
    pub target_language: LanguageCode,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, prefixing the text with the target language tag
    Working,
    /// Returns the input unchanged
    Echo,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with the given error
    Failing(ProviderError),
    /// Returns an empty response
    Empty,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    name: String,
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(name: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn working() -> Self {
        Self::new("mock", MockBehavior::Working)
    }

    pub fn echo() -> Self {
        Self::new("mock", MockBehavior::Echo)
    }

    pub fn failing() -> Self {
        Self::new(
            "mock",
            MockBehavior::Failing(ProviderError::ConnectionError("mock connection refused".into())),
        )
    }

    pub fn rate_limited() -> Self {
        Self::new(
            "mock",
            MockBehavior::Failing(ProviderError::RateLimitExceeded("mock 429".into())),
        )
    }

    pub fn empty() -> Self {
        Self::new("mock", MockBehavior::Empty)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new("mock", MockBehavior::Intermittent { fail_every })
    }

    /// Rename the mock, handy when two mocks sit in one fallback chain
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of translate calls so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    /// Text the `Working` behavior produces for `text`
    pub fn tagged(text: &str, target: LanguageCode) -> String {
        format!("[{}] {}", target, text)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().push(MockRequest {
            text: text.to_string(),
            source_language: source,
            target_language: target,
        });

        match &self.behavior {
            MockBehavior::Working => Ok(Self::tagged(text, target)),
            MockBehavior::Echo => Ok(text.to_string()),
            MockBehavior::Intermittent { fail_every } => {
                if *fail_every > 0 && count % fail_every == 0 {
                    Err(ProviderError::RequestFailed(format!("mock failure on request {}", count)))
                } else {
                    Ok(Self::tagged(text, target))
                }
            }
            MockBehavior::Failing(error) => Err(error.clone()),
            MockBehavior::Empty => Ok(String::new()),
        }
    }
}
