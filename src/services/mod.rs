pub mod booked_seats;
