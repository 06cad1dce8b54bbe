// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV reading, writing and upload decoding

mod csv_parser;

pub use csv_parser::CsvParser;
