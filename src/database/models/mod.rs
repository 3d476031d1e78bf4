pub mod activity;
pub mod event;
pub mod participation;
pub mod sport;
pub mod user;

pub use activity::Activity;
pub use event::Event;
pub use participation::Participation;
pub use sport::Sport;
pub use user::User;
