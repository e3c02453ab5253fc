mod marker;
pub use marker::{Marker, MarkerKind};

mod stop;
pub use stop::{campus_stops, Stop};
