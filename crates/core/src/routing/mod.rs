//! Route classification and the route gate.
//!
//! # Modules
//!
//! - `table` - Which paths are protected, auth-only, or neutral
//! - `gate` - Render/redirect decisions and the gate state machine
//! - `navigator` - Port to the surrounding navigation layer

pub mod gate;
pub mod navigator;
pub mod table;

#[cfg(test)]
mod gate_props;

pub use gate::{GateDecision, GateState, RouteGate, decide};
pub use navigator::Navigator;
pub use table::{RouteClass, RouteTable};
