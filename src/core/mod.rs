pub mod annotations;
pub mod color;
pub mod coords;
pub mod input;
pub mod screen_capture;
pub mod window;
pub mod worker;
