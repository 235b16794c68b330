pub mod uploaded_file;

pub use uploaded_file::{
    preview_url_for, DocumentType, GroupedFiles, GroupedFilesResponse, NewUploadedFile,
    UploadedFile, UploadedFileResponse,
};
