//! Document reading adapters

mod fs_reader;

pub use fs_reader::FsDocumentReader;
