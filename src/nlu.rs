//! NLU collaborator abstraction
//!
//! Turns free text into an intent plus typed entities. The production
//! implementation talks to a hosted LUIS-style endpoint; tests use a
//! recording fake.

mod error;
mod luis;
mod types;

pub use error::NluError;
pub use luis::LuisClient;
pub use types::{Classification, Entity, Intent};

use async_trait::async_trait;

/// Common interface for NLU providers.
///
/// A failed classification means the service was unavailable for this turn;
/// the dialog treats that exactly like an unmatched intent.
#[async_trait]
pub trait NluService: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification, NluError>;
}
