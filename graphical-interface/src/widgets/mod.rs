mod chrome;
mod controls;
pub use chrome::{footer, header};
pub use controls::{controls, ControlAction};
