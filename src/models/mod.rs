pub mod layout;
pub mod seat;
pub mod show;

pub use layout::{default_layout, Section, SeatId, SeatLayoutEntry};
pub use seat::{SeatState, SeatView};
pub use show::{Booking, Movie, Show};
