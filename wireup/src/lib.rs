//! Application wiring a data provider and a calculator with [wireup_di].
//!
//! The reference components are a [random data provider](dao::RandomDataProvider) and a
//! [calculator](service::ScalingCalculator) scaling provided values. They can be wired using one of
//! several [strategies](strategy), and the [Application](application::Application) runs a strategy
//! and reports the computed value.

pub mod application;
pub mod config;
pub mod context;
pub mod dao;
pub mod service;
pub mod strategy;
