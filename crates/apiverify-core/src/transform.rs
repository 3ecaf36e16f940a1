//! Response body transforms
//!
//! A narrow hook between dispatch and compare/store: each registered
//! transform rewrites the body in order before the snapshot decision is
//! made. Useful for scrubbing volatile content (timestamps, generated ids)
//! that would otherwise make every comparison a mismatch.

/// Rewrites a response body in place.
pub trait BodyTransform {
    fn apply(&self, body: &mut String);
}

/// Literal find/replace transform.
#[derive(Debug)]
pub struct ReplaceTransform {
    text: String,
    substitution: String,
}

impl ReplaceTransform {
    pub fn new<S1: Into<String>, S2: Into<String>>(text: S1, substitution: S2) -> Self {
        Self {
            text: text.into(),
            substitution: substitution.into(),
        }
    }
}

impl BodyTransform for ReplaceTransform {
    fn apply(&self, body: &mut String) {
        *body = body.replace(&self.text, &self.substitution);
    }
}

/// Run every registered transform over the body, in registration order.
pub fn apply_transforms(transforms: &[Box<dyn BodyTransform>], body: &mut String) {
    for transform in transforms {
        transform.apply(body);
    }
}
