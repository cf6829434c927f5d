//! Shared services for image I/O and export format handling

pub mod format;
pub mod io;

pub use format::ExportFormatHandler;
pub use io::ImageIoService;
