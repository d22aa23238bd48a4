//! Progress reporting while prices are collected

pub mod reporter;
