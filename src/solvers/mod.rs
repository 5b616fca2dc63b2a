// Copyright @yucwang 2026

pub mod bisection;
pub mod cash_karp;
