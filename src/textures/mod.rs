// Copyright @yucwang 2026

pub mod image;
pub mod mapping;
pub mod pattern;
