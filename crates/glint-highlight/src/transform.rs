//! Transformer capability and the fixed default chain.

use std::fmt;

use crate::token::TokenStream;
use crate::transformers::{MetaHighlight, NotationDiff, NotationFocus, NotationHighlight};

/// A single token-stream pass.
///
/// Transformers are stateless values; ordering matters only through the
/// shared stream they mutate, so a chain is an ordered list of these, not a
/// type hierarchy.
pub trait CodeTransformer: Send + Sync {
    /// Stable identifier, also the ordering contract exposed to callers.
    fn name(&self) -> &'static str;

    /// Mutate the token stream in place. Must not fail: an annotation the
    /// transformer cannot parse is left exactly as written.
    fn apply(&self, stream: &mut TokenStream);
}

/// Ordered sequence of transformers applied to every code block.
pub struct TransformerChain(Vec<Box<dyn CodeTransformer>>);

impl TransformerChain {
    /// The built-in chain, in its fixed order.
    pub fn default_chain() -> Self {
        Self(vec![
            Box::new(MetaHighlight),
            Box::new(NotationDiff),
            Box::new(NotationHighlight),
            Box::new(NotationFocus),
        ])
    }

    /// Run every transformer over the stream, in order.
    pub fn apply(&self, stream: &mut TokenStream) {
        for transformer in &self.0 {
            transformer.apply(stream);
        }
    }

    /// Transformer names, in chain order.
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for TransformerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
