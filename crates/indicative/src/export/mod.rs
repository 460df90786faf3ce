//! Export sinks available to the server.

mod pdf;
mod print;

pub use pdf::PdfTableSink;
pub use print::HtmlPrintSink;
