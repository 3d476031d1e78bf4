pub mod activities;
pub mod events;
pub mod users;
