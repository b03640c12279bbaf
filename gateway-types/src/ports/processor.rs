//! Payment processor port.
//!
//! This is the primary port in our hexagonal architecture. One processor
//! serves each operation kind; adapters (stub, ISO-8583 switch, ...)
//! implement this trait.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{OperationKind, ProcessingContext};
use crate::dto::{FinancialRequest, FinancialResponse};
use crate::error::ProcessingError;

/// Domain service for one financial operation.
///
/// Receives requests that already passed validation. Implementations doing
/// IO must respect `ctx.deadline`; the caller drops the returned future
/// when the deadline passes or the client goes away.
#[async_trait::async_trait]
pub trait PaymentProcessor: Send + Sync + 'static {
    async fn process(
        &self,
        ctx: &ProcessingContext,
        req: FinancialRequest,
    ) -> Result<FinancialResponse, ProcessingError>;
}

/// Returned when a registry is built without a processor for every kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no processor registered for: {}", missing_names(.0))]
pub struct MissingProcessors(pub Vec<OperationKind>);

fn missing_names(kinds: &[OperationKind]) -> String {
    kinds
        .iter()
        .map(OperationKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One processor per operation kind.
#[derive(Clone)]
pub struct ProcessorRegistry {
    processors: BTreeMap<OperationKind, Arc<dyn PaymentProcessor>>,
}

impl ProcessorRegistry {
    pub fn builder() -> ProcessorRegistryBuilder {
        ProcessorRegistryBuilder::default()
    }

    /// Serves every operation kind with the same processor.
    pub fn uniform(processor: Arc<dyn PaymentProcessor>) -> Self {
        let processors = OperationKind::ALL
            .into_iter()
            .map(|kind| (kind, processor.clone()))
            .collect();
        Self { processors }
    }

    /// The processor serving `kind`.
    ///
    /// A built registry always covers every kind.
    pub fn get(&self, kind: OperationKind) -> &Arc<dyn PaymentProcessor> {
        &self.processors[&kind]
    }
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("kinds", &self.processors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects processors before checking every kind is covered.
#[derive(Default)]
pub struct ProcessorRegistryBuilder {
    processors: BTreeMap<OperationKind, Arc<dyn PaymentProcessor>>,
}

impl ProcessorRegistryBuilder {
    /// Registers `processor` for `kind`, replacing any previous one.
    pub fn register(mut self, kind: OperationKind, processor: Arc<dyn PaymentProcessor>) -> Self {
        self.processors.insert(kind, processor);
        self
    }

    pub fn build(self) -> Result<ProcessorRegistry, MissingProcessors> {
        let missing: Vec<OperationKind> = OperationKind::ALL
            .into_iter()
            .filter(|kind| !self.processors.contains_key(kind))
            .collect();

        if !missing.is_empty() {
            return Err(MissingProcessors(missing));
        }

        Ok(ProcessorRegistry {
            processors: self.processors,
        })
    }
}
