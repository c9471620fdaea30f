//! Backend collaborators for HabPlan.
//!
//! Two independent services behind narrow interfaces:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`identity`] | Accounts: signup, login, token-gated profile lookup |
//! | [`store`] | Append-only saved-design store (JSON file or in-memory) |
//!
//! There is deliberately no link between the two — saved designs carry no
//! owner, and accounts reference no designs.

pub mod identity;
pub mod store;
