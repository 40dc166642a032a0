pub mod dashboard;
pub mod error;
pub mod landing;
pub mod loading;
