pub mod sheet_reader;
pub mod text_decoder;

pub use sheet_reader::SheetRow;
