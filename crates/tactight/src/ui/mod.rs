mod busy;

pub use busy::{BusyGuard, BusyIndicator};
