//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Aggregator/Reconciler  ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │Exchange │            │   Store     │              │ Notifier  │
//! │ Adapter │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```

pub mod outbound;

pub use outbound::exchange::ExchangeAdapter;
pub use outbound::notifier::{
    Event, LogNotifier, NewInstrumentsEvent, Notifier, NotifierRegistry, NullNotifier,
    SummaryEvent,
};
pub use outbound::store::InstrumentStore;
