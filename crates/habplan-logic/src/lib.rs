//! Pure layout logic for HabPlan.
//!
//! This crate contains all design-tool logic that is independent of any
//! storage, transport, or UI runtime. Functions take plain data and return
//! results, making them unit-testable and portable across the backend
//! collaborators and any future frontend.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Fixed zone-type catalog with minimum-area requirements |
//! | [`habitat`] | Mission/envelope configuration and derived capacity |
//! | [`session`] | Mutable zone list: add, move, resize, remove, snapshot |
//! | [`scoring`] | Per-type aggregates, constraint summary, mission score |
//! | [`zone`] | Placed zones, pixel→m² conversion, per-zone fit |

pub mod catalog;
pub mod habitat;
pub mod scoring;
pub mod session;
pub mod zone;
