//! Paginated PDF rendering of exports.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use indicative_core::export::{ExportArtifact, ExportDocument, ExportError, ExportSink};

// A4 landscape.
const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;
const MARGIN_MM: f32 = 15.0;
const ROW_HEIGHT_MM: f32 = 7.0;

const TITLE_SIZE: f32 = 14.0;
const DATE_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 9.0;

/// Left edge (mm) and width (characters) of each table column.
const COLUMNS: [(f32, usize); 4] = [(15.0, 55), (115.0, 40), (190.0, 24), (245.0, 20)];

/// One piece of text placed on a page. Coordinates are millimetres from
/// the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
struct TextRun {
    text: String,
    size: f32,
    x: f32,
    y: f32,
    bold: bool,
}

/// Renders exports as a landscape A4 PDF table, repeating the column
/// headers on every page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTableSink;

impl ExportSink for PdfTableSink {
    fn render(&self, document: &ExportDocument) -> Result<ExportArtifact, ExportError> {
        let pages = layout(document);

        let (pdf, first_page, first_layer) = PdfDocument::new(
            document.title_line.as_str(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Table",
        );
        let regular = pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Unavailable(e.to_string()))?;
        let bold = pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Unavailable(e.to_string()))?;

        for (index, runs) in pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Table")
            };
            let layer = pdf.get_page(page).get_layer(layer);
            for run in runs {
                let font = if run.bold { &bold } else { &regular };
                layer.use_text(run.text.as_str(), run.size, Mm(run.x), Mm(run.y), font);
            }
        }

        let bytes = pdf
            .save_to_bytes()
            .map_err(|e| ExportError::Render(e.to_string()))?;

        tracing::debug!(
            file = %document.file_name,
            pages = pages.len(),
            bytes = bytes.len(),
            "Rendered PDF export"
        );

        Ok(ExportArtifact {
            file_name: document.file_name.clone(),
            content_type: "application/pdf",
            bytes,
        })
    }
}

/// Places the title, the date line and the table on as many pages as the
/// rows need. Only the first page carries the title and date lines.
fn layout(document: &ExportDocument) -> Vec<Vec<TextRun>> {
    let mut pages = Vec::new();
    let mut page = Vec::new();

    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
    page.push(TextRun::new(&document.title_line, TITLE_SIZE, MARGIN_MM, y, true));
    y -= 8.0;
    page.push(TextRun::new(&document.date_line, DATE_SIZE, MARGIN_MM, y, false));
    y -= 12.0;
    push_cells(&mut page, document.headers.iter().copied(), y, true);

    for row in &document.rows {
        y -= ROW_HEIGHT_MM;
        if y < MARGIN_MM {
            pages.push(std::mem::take(&mut page));
            y = PAGE_HEIGHT_MM - MARGIN_MM;
            push_cells(&mut page, document.headers.iter().copied(), y, true);
            y -= ROW_HEIGHT_MM;
        }
        let cells = row.cells();
        push_cells(&mut page, cells.iter().map(String::as_str), y, false);
    }

    pages.push(page);
    pages
}

fn push_cells<'a>(
    page: &mut Vec<TextRun>,
    cells: impl Iterator<Item = &'a str>,
    y: f32,
    bold: bool,
) {
    for (cell, (x, width)) in cells.zip(COLUMNS) {
        page.push(TextRun::new(&truncate(cell, width), TABLE_SIZE, x, y, bold));
    }
}

impl TextRun {
    fn new(text: &str, size: f32, x: f32, y: f32, bold: bool) -> Self {
        Self {
            text: pdf_text(text),
            size,
            x,
            y,
            bold,
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Builtin fonts only cover ASCII reliably.
fn pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '?',
        })
        .collect()
}
