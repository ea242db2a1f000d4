//! HTTP request handlers.

pub mod health;
pub mod person;
pub mod vehicle;

pub use health::health_handler;
pub use person::{find_person_handler, save_person_handler};
pub use vehicle::{
    find_vehicle_handler, save_vehicle_handler, search_vehicles_handler,
    vehicles_created_since_handler,
};
