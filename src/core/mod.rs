// Copyright @yucwang 2021

pub mod hitable;
pub mod integrator;
pub mod ode;
pub mod scene;
pub mod scene_loader;
pub mod sensor;
pub mod texture;
