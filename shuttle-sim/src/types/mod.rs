pub const TICK_FREQUENCY_MILLIS: u64 = 2000;

pub mod broadcaster;

pub mod route;

pub mod sim_error;

pub mod simulation;
