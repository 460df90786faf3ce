use askama::Template;

use indicative_core::export::{ExportArtifact, ExportDocument, ExportError, ExportSink};

/// Print-ready page for an export. Escaped by askama.
#[derive(Template)]
#[template(path = "export_print.html")]
struct ExportPrintTemplate<'a> {
    file_name: &'a str,
    title_line: &'a str,
    date_line: &'a str,
    headers: &'a [&'static str],
    rows: Vec<[String; 4]>,
}

/// Renders exports as a landscape A4 HTML page that prints itself on load.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPrintSink;

impl ExportSink for HtmlPrintSink {
    fn render(&self, document: &ExportDocument) -> Result<ExportArtifact, ExportError> {
        let html = ExportPrintTemplate {
            file_name: &document.file_name,
            title_line: &document.title_line,
            date_line: &document.date_line,
            headers: &document.headers,
            rows: document.rows.iter().map(|row| row.cells()).collect(),
        }
        .render()
        .map_err(|e| ExportError::Render(e.to_string()))?;

        Ok(ExportArtifact {
            file_name: html_file_name(&document.file_name),
            content_type: "text/html; charset=utf-8",
            bytes: html.into_bytes(),
        })
    }
}

fn html_file_name(file_name: &str) -> String {
    match file_name.strip_suffix(".pdf") {
        Some(stem) => format!("{stem}.html"),
        None => format!("{file_name}.html"),
    }
}
