//! # Routers
//!
//! Entry points from the block driver into the modules:
//!
//! - [`tx_router`]: message gating, stateless validation, handler dispatch
//! - [`query_router`]: `custom/<module>/...` path dispatch

pub mod query_router;
pub mod tx_router;

pub use query_router::{route_query, QUERY_ROUTE_CUSTOM};
pub use tx_router::{deliver_msg, TxResult};
