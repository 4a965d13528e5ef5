mod controller;
mod types;

pub use controller::{UploadController, ERROR_PREFIX};
pub use types::SelectedFile;
