//! Handset Advisor - mobile device recommendations
//!
//! A random-forest classifier assigns a price tier to every catalog device,
//! user constraints narrow the tier-annotated catalog to a short list, and a
//! language model picks and justifies one device from that list.

pub mod api;
pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod reasoning;
