//! Request context carried alongside log calls.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Caller-supplied request context.
///
/// The `ctx_*` logging operations accept a `Context` so call sites can keep
/// correlation data at hand, but the pipeline does not attach it to records
/// yet; the parameter is reserved for correlation propagation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    /// Correlation identifier for the request or job.
    pub request_id: Option<String>,

    /// Loose key-value payload.
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl Context {
    /// An empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a correlation identifier.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Attach an extra field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The correlation identifier, when set.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_accumulate() {
        let ctx = Context::new()
            .with_request_id("req-42")
            .with_field("tenant", "acme")
            .with_field("attempt", 3);

        assert_eq!(ctx.request_id(), Some("req-42"));
        assert_eq!(ctx.fields["tenant"], serde_json::json!("acme"));
        assert_eq!(ctx.fields["attempt"], serde_json::json!(3));
    }

    #[test]
    fn empty_context_has_no_request_id() {
        assert_eq!(Context::new().request_id(), None);
    }
}
