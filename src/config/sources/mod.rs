pub(crate) mod environment;
pub(crate) mod global_file;
