//! Client inputs and batch loading

mod data;
pub mod loader;

pub use data::{
    ClientProfile, Goal, PaymentMode, PolicyType, RiderId, RiderSet, Sex, SmokerStatus,
    TermLength, UsState, MAX_AGE, MIN_AGE,
};
pub use loader::{load_clients, load_clients_from_reader, load_profile_json, ClientRecord};
