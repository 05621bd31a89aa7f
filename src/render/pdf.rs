use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Pt,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::{render_calendar, Face, Font, GridLayout, Paint, Rect, Rgb, Surface};
use crate::calendar::LifeCalendar;
use crate::error::*;

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(rgb.0, rgb.1, rgb.2, None))
}

/// A single page PDF document drawn through `printpdf`.
pub struct PdfSurface {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfSurface {
    pub fn new(title: &str, width: f32, height: f32) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, mm(width), mm(height), "Calendar");
        let layer = doc.get_page(page).get_layer(layer);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        Ok(PdfSurface {
            doc,
            layer,
            regular,
            bold,
        })
    }

    pub fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.doc.save(&mut BufWriter::new(file))?;
        Ok(())
    }

    pub fn into_bytes(self) -> Result<Vec<u8>> {
        Ok(self.doc.save_to_bytes()?)
    }
}

impl Surface for PdfSurface {
    fn rect(&mut self, rect: Rect, paint: Paint) {
        let mode = match (paint.fill, paint.stroke) {
            (Some(_), Some(_)) => PaintMode::FillStroke,
            (Some(_), None) => PaintMode::Fill,
            (None, Some(_)) => PaintMode::Stroke,
            (None, None) => return,
        };

        if let Some(fill) = paint.fill {
            self.layer.set_fill_color(color(fill));
        }
        if let Some(stroke) = paint.stroke {
            self.layer.set_outline_color(color(stroke.color));
            self.layer.set_outline_thickness(stroke.width);
        }

        let shape = printpdf::Rect::new(
            mm(rect.x),
            mm(rect.y),
            mm(rect.x + rect.width),
            mm(rect.y + rect.height),
        )
        .with_mode(mode);
        self.layer.add_rect(shape);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: Font, rgb: Rgb) {
        let face = match font.face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
        };

        self.layer.set_fill_color(color(rgb));
        self.layer.use_text(text, font.size, mm(x), mm(y), face);
    }
}

fn draw(calendar: &LifeCalendar) -> Result<PdfSurface> {
    let layout = GridLayout::letter();
    let title = format!("Number Our Days - {}", calendar.record().name());
    let mut surface = PdfSurface::new(&title, layout.page_width, layout.page_height)?;

    render_calendar(&mut surface, calendar, &layout);

    Ok(surface)
}

/// Renders `calendar` on a US Letter page and writes it to `path`.
pub fn write_pdf(path: &Path, calendar: &LifeCalendar) -> Result<()> {
    draw(calendar)?.save(path)?;
    log::info!("Wrote life calendar to '{}'", path.display());
    Ok(())
}

pub fn pdf_bytes(calendar: &LifeCalendar) -> Result<Vec<u8>> {
    draw(calendar)?.into_bytes()
}
