pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod boundary;
pub mod operators;
pub mod trail;
pub mod registry;
pub mod scenario;
