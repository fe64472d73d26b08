pub mod config;
pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod fsm;
pub mod integrators;
pub mod models;
pub mod physics;
pub mod rendering;
pub mod scheduling;
pub mod simulation;
