pub mod fuel_log;
pub mod player;
pub mod session;

pub use fuel_log::{DayLabel, FuelLog, NewFuelLog};
pub use player::Player;
pub use session::SessionState;
