mod bus;
mod stops;

pub use bus::Bus;
pub use stops::Stops;
