pub mod concessions;
pub mod edit_lock;
pub mod movies;
pub mod schedule;
pub mod seats;
