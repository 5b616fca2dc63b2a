// Copyright @yucwang 2026

pub mod kerr;
pub mod schwarzschild;
