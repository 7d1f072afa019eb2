//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: destination and status line
//! - `CostSummary`: itemized breakdown and the animated total
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `TripForm`: focusable trip options; turns key events into core `Action`s
//!
//! Components receive external data as props (struct fields) rather than
//! reaching into the `Estimator`, so each one renders in tests from plain values.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status line)
//! ├── trip_form.rs     (Inputs: slider, toggles, tier, booking)
//! └── cost_summary.rs  (Line items + animated total)
//! ```

pub mod cost_summary;
pub mod title_bar;
pub mod trip_form;

pub use cost_summary::CostSummary;
pub use title_bar::TitleBar;
pub use trip_form::{FormRow, TripForm};
