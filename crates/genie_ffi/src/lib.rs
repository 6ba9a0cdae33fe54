//! Flutter bridge surface for the Genie core.

pub mod api;
