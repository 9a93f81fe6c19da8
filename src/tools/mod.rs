pub mod color_seeker;
pub mod target_seeker;
pub mod r#trait;
