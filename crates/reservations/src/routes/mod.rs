pub mod chaos;
pub mod reserve;
