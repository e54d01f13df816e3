pub mod editor;
pub mod upload;

pub use editor::{EditorState, show_editor};
pub use upload::{request_photo, show_upload};
