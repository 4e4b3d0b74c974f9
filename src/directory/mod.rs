//! Directory Module
//!
//! Static action table and the pagination aggregator that drives a paged
//! directory listing to completion.

mod actions;
mod aggregator;

pub use actions::{resolve_action, ActionSpec, ACTIONS};
pub use aggregator::{aggregate, AggregatedResult, Page, NEXT_TOKEN_FIELD, RECORD_COUNT_FIELD};
