pub mod area;
pub mod auth;
pub mod category;
pub mod grade;
pub mod health;
pub mod loan;
pub mod meeting;
pub mod pedagogical_hour;
pub mod reservation;
pub mod resource;
pub mod settings;
pub mod user;
pub mod v1;
