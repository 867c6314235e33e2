mod upload;

pub use self::upload::{UPLOADS_ROUTE, UploadError, UploadStore};
