//! Lottery Live - Real-time draw snapshot broadcaster
//!
//! This crate holds the single current lottery draw snapshot, pushes it to
//! every connected Server-Sent Events subscriber as it changes, and archives
//! the day's settled result once inside a narrow local-time window.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
