//! PDF and DOCX export formatters.
//!
//! Both documents carry the same layout: a title, a generation timestamp,
//! the address list and a closing footer line. PDF is assembled object by
//! object with `lopdf` and paginated on US Letter; DOCX goes through
//! `docx-rs` and is packed in memory.

use std::io::Cursor;

use chrono::{DateTime, Local};
use docx_rs::{BreakType, Docx, LineSpacing, Paragraph, Run};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use crate::errors::{MailsiftError, Result};
use crate::output::{ExportFormatter, ExportPayload, ExportRequest};

pub const DOCUMENT_TITLE: &str = "Extracted Email Addresses";
pub const DOCUMENT_FOOTER: &str = "Created with mailsift";
const AUTHOR: &str = "mailsift";

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;
const BODY_INDENT: i64 = 30;
const TITLE_SIZE: i64 = 20;
const STAMP_SIZE: i64 = 10;
const BODY_SIZE: i64 = 12;
const BODY_LEADING: i64 = 17;
const FOOTER_SIZE: i64 = 8;
const FOOTER_Y: i64 = 50;

fn timestamp_line(at: &DateTime<Local>) -> String {
    format!("Generated on {}", at.format("%Y-%m-%d %H:%M:%S"))
}

/// PDF via `lopdf`, Helvetica throughout.
#[derive(Debug, Clone)]
pub struct PdfFormatter {
    generated_at: DateTime<Local>,
}

impl Default for PdfFormatter {
    fn default() -> Self {
        Self::at(Local::now())
    }
}

impl PdfFormatter {
    pub fn at(generated_at: DateTime<Local>) -> Self {
        Self { generated_at }
    }

    /// Body text split into printable lines, wrapped to the column width.
    fn body_lines(request: &ExportRequest<'_>) -> Vec<String> {
        // Helvetica averages about half an em per glyph.
        let max_chars = ((PAGE_WIDTH - 2 * MARGIN - BODY_INDENT) * 2 / BODY_SIZE) as usize;
        let joiner = format!("{}\n", request.separator.as_str());
        let body = request.addresses.join(&joiner);

        let mut lines = Vec::new();
        for raw in body.split('\n') {
            let chars: Vec<char> = raw.chars().collect();
            if chars.is_empty() {
                lines.push(String::new());
                continue;
            }
            for chunk in chars.chunks(max_chars) {
                lines.push(chunk.iter().collect());
            }
        }
        lines
    }

    fn layout(&self, request: &ExportRequest<'_>) -> Vec<Vec<Operation>> {
        let mut pages = Vec::new();
        let mut ops = Vec::new();
        let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE;

        ops.extend(text_ops(
            "F2",
            TITLE_SIZE,
            centered_x(DOCUMENT_TITLE, TITLE_SIZE),
            y,
            DOCUMENT_TITLE,
        ));
        y -= TITLE_SIZE + STAMP_SIZE;
        let stamp = timestamp_line(&self.generated_at);
        ops.extend(text_ops("F1", STAMP_SIZE, centered_x(&stamp, STAMP_SIZE), y, &stamp));
        y -= 2 * BODY_LEADING;

        for line in Self::body_lines(request) {
            if y - BODY_LEADING < FOOTER_Y + 2 * FOOTER_SIZE {
                ops.extend(footer_ops());
                pages.push(std::mem::take(&mut ops));
                y = PAGE_HEIGHT - MARGIN;
            }
            y -= BODY_LEADING;
            if !line.is_empty() {
                ops.extend(text_ops("F1", BODY_SIZE, MARGIN + BODY_INDENT, y, &line));
            }
        }
        ops.extend(footer_ops());
        pages.push(ops);
        pages
    }

    fn build(&self, request: &ExportRequest<'_>) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular = doc.add_object(font_dict("Helvetica"));
        let bold = doc.add_object(font_dict("Helvetica-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular,
                "F2" => bold,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in self.layout(request) {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| MailsiftError::document("pdf", e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(count),
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH),
                    Object::Integer(PAGE_HEIGHT),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let title = format!("Extracted Emails - {}", request.caption);
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(pdf_text(&title)),
            "Author" => Object::string_literal(AUTHOR),
            "Producer" => Object::string_literal(AUTHOR),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| MailsiftError::document("pdf", e.to_string()))?;
        Ok(bytes)
    }
}

impl ExportFormatter for PdfFormatter {
    fn render(&self, request: &ExportRequest<'_>) -> Result<ExportPayload> {
        Ok(ExportPayload {
            bytes: self.build(request)?,
            mime_type: self.mime_type(),
        })
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn file_extension(&self) -> &'static str {
        ".pdf"
    }
}

fn font_dict(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Printable ASCII passes through; anything else prints as `?`.
fn pdf_text(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' })
        .collect()
}

fn centered_x(text: &str, size: i64) -> i64 {
    let width = text.chars().count() as i64 * size / 2;
    ((PAGE_WIDTH - width) / 2).max(MARGIN)
}

fn text_ops(font: &str, size: i64, x: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), Object::Integer(size)]),
        Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
        Operation::new("Tj", vec![Object::string_literal(pdf_text(text))]),
        Operation::new("ET", vec![]),
    ]
}

fn footer_ops() -> Vec<Operation> {
    text_ops(
        "F1",
        FOOTER_SIZE,
        centered_x(DOCUMENT_FOOTER, FOOTER_SIZE),
        FOOTER_Y,
        DOCUMENT_FOOTER,
    )
}

/// Word document via `docx-rs`.
#[derive(Debug, Clone)]
pub struct DocxFormatter {
    generated_at: DateTime<Local>,
}

impl Default for DocxFormatter {
    fn default() -> Self {
        Self::at(Local::now())
    }
}

impl DocxFormatter {
    pub fn at(generated_at: DateTime<Local>) -> Self {
        Self { generated_at }
    }

    fn address_paragraph(request: &ExportRequest<'_>) -> Paragraph {
        let mut para = Paragraph::new();
        let last = request.addresses.len().saturating_sub(1);
        for (i, address) in request.addresses.iter().enumerate() {
            let mut run = Run::new().add_text(address.as_str()).size(24);
            if i < last {
                if request.separator.is_newline() {
                    run = run.add_break(BreakType::TextWrapping);
                } else {
                    run = run.add_text(request.separator.as_str());
                }
            }
            para = para.add_run(run);
        }
        para
    }

    fn build(&self, request: &ExportRequest<'_>) -> Result<Vec<u8>> {
        let heading = Paragraph::new()
            .add_run(Run::new().add_text(DOCUMENT_TITLE).bold().size(32))
            .line_spacing(LineSpacing::new().after(200));
        let stamp = Paragraph::new()
            .add_run(Run::new().add_text(timestamp_line(&self.generated_at)).size(20))
            .line_spacing(LineSpacing::new().after(400));
        let footer = Paragraph::new()
            .add_run(Run::new().add_text(DOCUMENT_FOOTER).size(16))
            .line_spacing(LineSpacing::new().before(600));

        let mut cursor = Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(heading)
            .add_paragraph(stamp)
            .add_paragraph(Self::address_paragraph(request))
            .add_paragraph(footer)
            .build()
            .pack(&mut cursor)
            .map_err(|e| MailsiftError::document("docx", e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

impl ExportFormatter for DocxFormatter {
    fn render(&self, request: &ExportRequest<'_>) -> Result<ExportPayload> {
        Ok(ExportPayload {
            bytes: self.build(request)?,
            mime_type: self.mime_type(),
        })
    }

    fn mime_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }

    fn file_extension(&self) -> &'static str {
        ".doc"
    }
}
