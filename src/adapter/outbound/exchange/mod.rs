//! Exchange listing adapters.
//!
//! One [`ExchangeAdapter`](crate::port::ExchangeAdapter) per exchange, all
//! sharing a single [`ListingClient`].

pub mod binance;
pub mod bitget;
pub mod bybit;
pub mod factory;
pub mod gate;
pub mod okx;
pub mod settings;

mod http;

pub use factory::{Exchange, ExchangeFactory};
pub use http::ListingClient;
pub use settings::{EndpointOverride, Endpoints, HttpConfig};
