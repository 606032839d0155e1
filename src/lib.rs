//! Clubroom - a minimal members-area web application
//!
//! This library provides the core functionality for the Clubroom web app:
//! signup/login, cookie sessions, and server-rendered pages.

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod views;
pub mod web;
