pub mod ext;
pub mod filesystem;
