//! Robot Structure - structural model of parsed Robot Framework files
//!
//! This crate holds what a tokenizer recognizes in one suite or resource
//! file: classified, positioned tokens and the per-file document that
//! collects settings, variables, test cases and keywords for editor
//! features such as outline and go-to-definition.

pub mod classifier;
pub mod config;
pub mod definitions;
pub mod diagnostics;
pub mod document;
pub mod escaping;
pub mod store;
pub mod token;
