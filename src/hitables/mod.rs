// Copyright @yucwang 2026

pub mod disk;
pub mod horizon;
pub mod sky;
pub mod sphere;
