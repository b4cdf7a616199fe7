//! PetPal - Charming Pet-Loving AI Companion
//!
//! This crate implements a stateful conversational companion service:
//! per-session profiles and conversation stages drive prompt composition
//! over a curated library of pet stories and compliments.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
