pub mod excel_read;
pub mod excel_write;
pub mod json_read;
pub mod json_write;
