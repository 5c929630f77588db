//! Scam Warden - Conversational Fraud Intelligence Engine
//!
//! Classifies inbound conversational messages as fraud attempts, drives a
//! multi-turn engagement with the sender, and accumulates structured
//! intelligence (payment handles, account numbers, contact points) per
//! conversation session.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
