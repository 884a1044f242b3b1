//! Zametki - personal notes manager and news board
//!
//! This library provides the core functionality for the Zametki web service.

pub mod cache;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod web;
