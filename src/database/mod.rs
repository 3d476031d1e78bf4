pub mod activities;
pub mod events;
pub mod manager;
pub mod models;
pub mod sports;
pub mod users;
