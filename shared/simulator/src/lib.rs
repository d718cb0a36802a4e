//! A small fixed-step world for driving [bendy_planner] agents through
//! obstacle scenarios.

pub mod agent;
pub mod body;
pub mod collision;
pub mod rng;
pub mod scenario;
pub mod simulation;
