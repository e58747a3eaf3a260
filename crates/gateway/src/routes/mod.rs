pub mod landing;
pub mod reserve;
