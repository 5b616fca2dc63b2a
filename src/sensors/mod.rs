// Copyright @yucwang 2026

pub mod perspective;
pub mod pinhole;
