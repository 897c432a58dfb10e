pub mod config_reader;
pub mod document_writer;
