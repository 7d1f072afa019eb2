//! # Core Estimator Logic
//!
//! Pricing, the state that drives it, and the animated total.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Estimator (state)    │
//!                    │  • Action (events)      │
//!                    │  • compute() (pricing)  │
//!                    │  • ValueInterpolator    │
//!                    └───────────┬─────────────┘
//!                                │ watch channels
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    Web     │      │   Tests    │
//!     │  Adapter   │      │  (future)  │      │            │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`trip`]: `TripConfiguration`, the options being priced
//! - [`pricing`]: `PricingTable` and the pure `compute()` rules
//! - [`state`]: `Estimator`, sole owner of the configuration
//! - [`interpolator`]: the cancellable count-up animation
//! - [`action`]: `Action` / `Effect` and the `update()` reducer
//! - [`config`]: file, env and CLI settings

pub mod action;
pub mod config;
pub mod interpolator;
pub mod pricing;
pub mod state;
pub mod trip;
