//! Spanish fuel station finder.
//!
//! A web application that answers: "which fuel stations near me sell the
//! fuel I need, and which of them are open right now?" Station data comes
//! from the Ministry fuel price service; opening hours are parsed from its
//! free-text schedules.

pub mod cache;
pub mod config;
pub mod domain;
pub mod filter;
pub mod minetur;
pub mod source;
pub mod web;
