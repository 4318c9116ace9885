//! # Debounced Recalculation
//!
//! The glass calculator re-prices on every input change. Requests are
//! debounced, and every call takes a new generation number; a result is only
//! applied to the preview if no newer call has started since. Older requests
//! are not aborted, their answers are just dropped, whatever order they
//! arrive in.
//!
//! Invalid input (no size yet, zero quantity) clears the preview without
//! calling the service. Failures clear the preview and leave a message; the
//! next input change tries again.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::calculations::glass::{self, GlassQuote, GlassQuoteInput};
use crate::config::PricingConfig;
use crate::pricing::PricingService;
use crate::rounding::RoundingStrategy;

/// Default quiet time after the last input change
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// What the calculator shows under the form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value")]
pub enum Preview {
    /// Nothing to show
    #[default]
    Empty,
    Ready(GlassQuote),
    /// Cleared with a message for the user
    Error(String),
}

/// Outcome of one [`Recalculator::recalculate`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Recompute {
    /// This call was the latest; its preview is now current
    Applied(Preview),
    /// A newer call started; this result was discarded
    Superseded,
}

/// Owns the preview and decides which price result wins.
pub struct Recalculator {
    service: Arc<dyn PricingService>,
    company_id: String,
    debounce: Duration,
    strategy: RoundingStrategy,
    generation: AtomicU64,
    preview: watch::Sender<Preview>,
}

impl Recalculator {
    pub fn new(service: Arc<dyn PricingService>, company_id: impl Into<String>) -> Self {
        let (preview, _) = watch::channel(Preview::Empty);
        Recalculator {
            service,
            company_id: company_id.into(),
            debounce: DEFAULT_DEBOUNCE,
            strategy: RoundingStrategy::RoundUnitOnly,
            generation: AtomicU64::new(0),
            preview,
        }
    }

    pub fn from_config(service: Arc<dyn PricingService>, config: &PricingConfig) -> Self {
        Recalculator::new(service, config.session.company_id.clone())
            .with_debounce(config.session.debounce())
            .with_rounding(config.rounding.glass)
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_rounding(mut self, strategy: RoundingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Watch the preview as results are applied.
    pub fn subscribe(&self) -> watch::Receiver<Preview> {
        self.preview.subscribe()
    }

    /// Current preview
    pub fn preview(&self) -> Preview {
        self.preview.borrow().clone()
    }

    /// Number of recalculations started so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn apply(&self, generation: u64, preview: Preview) -> Recompute {
        if !self.is_current(generation) {
            tracing::debug!(generation, "discarding stale price result");
            return Recompute::Superseded;
        }
        self.preview.send_replace(preview.clone());
        Recompute::Applied(preview)
    }

    /// Re-price after an input change.
    pub async fn recalculate(&self, input: &GlassQuoteInput) -> Recompute {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Err(e) = input.validate() {
            tracing::debug!(generation, reason = %e, "input incomplete, clearing preview");
            return self.apply(generation, Preview::Empty);
        }

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(generation) {
            tracing::debug!(generation, "superseded during debounce");
            return Recompute::Superseded;
        }

        tracing::debug!(generation, "fetching price");
        let priced =
            glass::calculate(input, &self.company_id, self.service.as_ref(), self.strategy).await;
        let preview = match priced {
            Ok(quote) => Preview::Ready(quote),
            Err(e) if e.is_silent() => Preview::Empty,
            Err(e) => {
                tracing::warn!(
                    generation,
                    code = e.error_code(),
                    error = %e,
                    "price calculation failed"
                );
                Preview::Error(e.user_message())
            }
        };
        self.apply(generation, preview)
    }
}
