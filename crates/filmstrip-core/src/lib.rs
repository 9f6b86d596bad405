pub mod error;
pub mod consts;
pub mod layout;
pub mod scroll;
pub mod zoom;
pub mod gesture;
pub mod viewer;
