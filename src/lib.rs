//! CourseHub Memberships - Membership Lifecycle Engine
//!
//! This crate implements the membership lifecycle for the CourseHub learning
//! platform: category-limited plan tiers, calendar-month expiry windows, and
//! expired-only renewal.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
