pub mod chaos;
pub mod health;
pub mod seats;
