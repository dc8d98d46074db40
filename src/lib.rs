//! Impact Compass - Organization Assessment Engine
//!
//! This crate implements the assessment engine behind a multi-step
//! organization readiness questionnaire: conditional branching, section
//! progress tracking, debounced answer persistence, and weighted scoring
//! into an eligibility and financing instrument recommendation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
