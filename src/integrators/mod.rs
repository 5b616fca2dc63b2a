// Copyright @yucwang 2026

pub mod kerr;
pub mod march;
pub mod schwarzschild;
