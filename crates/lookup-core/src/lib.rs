//! Core library for competency lookup.
//!
//! Loads participant records from an HTTP endpoint or a JSON file and
//! answers two kinds of question about them: what one participant scored
//! on one competency, and how a competency summarises across everyone
//! (lowest, highest, average, value type).
//!
//! - `models`: records, dataset, selection modes
//! - `analysis`: pure extraction, lookup and summary functions
//! - `form`: the selection state machine behind the front end
//! - `api`: the data provider and its errors
//! - `config`: on-disk configuration

pub mod analysis;
pub mod api;
pub mod config;
pub mod form;
pub mod models;
