pub mod role;
pub mod user;
pub mod movie;
pub mod booking;

pub use role::Role;
pub use user::{NewUser, User};
pub use movie::{Movie, NewMovie};
pub use booking::{Booking, NewBooking};
