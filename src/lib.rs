#![allow(non_snake_case)]
pub mod state_estimator;
pub mod consistency;
pub mod config;
pub mod signal;
pub mod simulator;
pub mod filter_bank;
pub mod data_parsing;
pub mod report;
pub mod plotting;
