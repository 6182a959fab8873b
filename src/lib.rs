//! Income Accrual & Payroll Calendar Engine
//!
//! This crate turns salary, temporary benefit, pension and semi-annual benefit
//! declarations into year-to-date accruals, annual/monthly run rates and
//! qualitative risk bands. Every computation is a pure function of its inputs
//! and an explicit as-of date.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
