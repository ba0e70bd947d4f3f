//! Client for the resume evaluation service.
//!
//! [`controller::SubmissionController`] owns the form and the outcome state;
//! [`eval_client`] talks to the service; [`render`] turns an outcome into text.

pub mod config;
pub mod controller;
pub mod errors;
pub mod eval_client;
pub mod models;
pub mod render;
