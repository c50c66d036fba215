//! HTTP service exposing the manifest generator

pub mod api;
pub mod config;
