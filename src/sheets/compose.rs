//! Sheet composer
//!
//! Turns one (month, type) group of expense records into a single multi-page
//! PDF: a title line per page, receipt images laid into the grid in date
//! order, and a small caption under each image. Items whose image is missing
//! or unreadable are skipped without consuming a grid slot; only a failure to
//! write the finished document is fatal for the group.

use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfLayerReference, Pt, Rgb,
};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseRecord;
use crate::storage::ReceiptStore;

use super::fit::fit_image;
use super::grid::PageGeometry;
use super::group::Group;

const TITLE_FONT_SIZE: f32 = 12.0;
const CAPTION_FONT_SIZE: f32 = 6.0;
/// Baseline of the title line, measured down from the top edge
const TITLE_BASELINE_OFFSET: f32 = 30.0;
/// Captions sit this far below the cell's bottom edge
const CAPTION_DROP: f32 = 2.0;

/// Why an item was left off the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No receipt reference, or the reference did not resolve to a file
    MissingImage,
    /// The image bytes could not be decoded, or decoded to zero dimensions
    DecodeError,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingImage => write!(f, "missing image"),
            Self::DecodeError => write!(f, "decode error"),
        }
    }
}

/// A group member that could not be placed
#[derive(Debug, Clone)]
pub struct SkippedItem {
    pub record: ExpenseRecord,
    pub reason: SkipReason,
}

/// Axis-aligned rectangle in page points, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One successfully placed image; write-once, read during serialization and
/// by tests
#[derive(Debug, Clone)]
pub struct PlacedItem {
    pub record: ExpenseRecord,
    /// Zero-based page the item landed on
    pub page: usize,
    /// The grid cell reserved for this item
    pub cell_rect: Rect,
    /// The fitted, centered image rectangle inside the cell
    pub image_rect: Rect,
}

/// Outcome of composing one group
#[derive(Debug)]
pub struct ComposeResult {
    /// Where the finished document was written
    pub output_path: PathBuf,
    /// Pages holding at least one image (zero when nothing was placed)
    pub pages: usize,
    /// Title drawn on each allocated page, in allocation order. The first
    /// page always exists, so this is never empty even when `pages` is zero.
    pub page_titles: Vec<String>,
    /// Successfully placed items, in placement order
    pub placed: Vec<PlacedItem>,
    /// Members skipped, with reasons
    pub skipped: Vec<SkippedItem>,
}

impl ComposeResult {
    /// Number of successfully placed images
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }
}

/// Composes receipt sheets for groups of expense records
pub struct SheetComposer<'a> {
    geometry: PageGeometry,
    receipts: &'a ReceiptStore,
    output_dir: PathBuf,
}

impl<'a> SheetComposer<'a> {
    /// Create a composer writing documents into `output_dir`
    pub fn new(receipts: &'a ReceiptStore, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            geometry: PageGeometry::default(),
            receipts,
            output_dir: output_dir.into(),
        }
    }

    /// Override the page geometry (tests and alternate paper sizes)
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Compose one group into a PDF under the output directory
    ///
    /// Members are placed in ascending date order (stable for equal dates).
    /// The placed index only advances on success, so a skipped member never
    /// consumes a grid slot and page boundaries stay fixed at
    /// `slots_per_page` placed images.
    pub fn compose(&self, group: &Group) -> ExpenseResult<ComposeResult> {
        let geom = &self.geometry;
        let slots = geom.slots_per_page();

        let mut members = group.members.clone();
        members.sort_by_key(|r| r.date);

        let title = group.key.title();

        let (doc, first_page, first_layer) = PdfDocument::new(
            &title,
            Mm::from(Pt(geom.page_width)),
            Mm::from(Pt(geom.page_height)),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExpenseError::Pdf(e.to_string()))?;

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        self.draw_title(&layer, &font, &title);

        let mut placed: Vec<PlacedItem> = Vec::new();
        let mut page_titles = vec![title.clone()];
        let mut skipped = Vec::new();

        for record in &members {
            let placed_index = placed.len();

            // Resolve the receipt bytes first; a miss must not allocate a slot
            let reference = match &record.receipt_path {
                Some(r) => r.clone(),
                None => {
                    skipped.push(SkippedItem {
                        record: record.clone(),
                        reason: SkipReason::MissingImage,
                    });
                    continue;
                }
            };
            let bytes = match self.receipts.read(&reference) {
                Ok(bytes) => bytes,
                Err(ExpenseError::ImageNotFound { .. }) => {
                    skipped.push(SkippedItem {
                        record: record.clone(),
                        reason: SkipReason::MissingImage,
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            // Page boundaries are fixed-size: a new page exactly when the
            // placed index reaches a positive multiple of the grid capacity.
            if geom.page_index(placed_index) + 1 > page_titles.len() {
                let (page, inner_layer) = doc.add_page(
                    Mm::from(Pt(geom.page_width)),
                    Mm::from(Pt(geom.page_height)),
                    "Layer 1",
                );
                layer = doc.get_page(page).get_layer(inner_layer);
                let cont_title = format!("{} (cont.)", title);
                self.draw_title(&layer, &font, &cont_title);
                page_titles.push(cont_title);
            }

            // Natural dimensions come from the header read; the full decode
            // below is only for embedding.
            let (img_width, img_height) = match self.receipts.dimensions(&reference, &bytes) {
                Ok(dims) => dims,
                Err(_) => {
                    skipped.push(SkippedItem {
                        record: record.clone(),
                        reason: SkipReason::DecodeError,
                    });
                    continue;
                }
            };

            let fitted = match fit_image(
                img_width,
                img_height,
                geom.cell_width(),
                geom.cell_height(),
            ) {
                Ok(fitted) => fitted,
                Err(_) => {
                    // Zero-sized natural dimensions: reported like any other
                    // unreadable image
                    skipped.push(SkippedItem {
                        record: record.clone(),
                        reason: SkipReason::DecodeError,
                    });
                    continue;
                }
            };

            let decoded = match self.receipts.decode(&reference, &bytes) {
                Ok(img) => img,
                Err(_) => {
                    skipped.push(SkippedItem {
                        record: record.clone(),
                        reason: SkipReason::DecodeError,
                    });
                    continue;
                }
            };

            let (cell_x, cell_y) = geom.cell_origin(placed_index % slots);

            // At 72 dpi one pixel is one point, so the scale factors map the
            // natural size directly onto the fitted rectangle.
            Image::from_dynamic_image(&decoded).add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm::from(Pt(cell_x + fitted.offset_x))),
                    translate_y: Some(Mm::from(Pt(cell_y + fitted.offset_y))),
                    scale_x: Some(fitted.width / img_width as f32),
                    scale_y: Some(fitted.height / img_height as f32),
                    dpi: Some(72.0),
                    ..Default::default()
                },
            );

            self.draw_caption(
                &layer,
                &font,
                &format!("{} {}", record.date, record.amount),
                cell_x,
                cell_y - CAPTION_DROP,
            );

            placed.push(PlacedItem {
                record: record.clone(),
                page: geom.page_index(placed_index),
                cell_rect: Rect {
                    x: cell_x,
                    y: cell_y,
                    width: geom.cell_width(),
                    height: geom.cell_height(),
                },
                image_rect: Rect {
                    x: cell_x + fitted.offset_x,
                    y: cell_y + fitted.offset_y,
                    width: fitted.width,
                    height: fitted.height,
                },
            });
        }

        let output_path = self.output_dir.join(group.key.document_name());
        self.save(doc, &output_path)?;

        Ok(ComposeResult {
            output_path,
            pages: geom.pages_for(placed.len()),
            page_titles,
            placed,
            skipped,
        })
    }

    /// Draw the per-page title line inside the title band
    fn draw_title(&self, layer: &PdfLayerReference, font: &IndirectFontRef, text: &str) {
        layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        layer.use_text(
            text,
            TITLE_FONT_SIZE,
            Mm::from(Pt(self.geometry.margin)),
            Mm::from(Pt(self.geometry.page_height - TITLE_BASELINE_OFFSET)),
            font,
        );
    }

    /// Draw a reduced-contrast caption anchored at a cell's bottom-left
    fn draw_caption(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        text: &str,
        x: f32,
        y: f32,
    ) {
        layer.set_fill_color(Color::Rgb(Rgb::new(0.3, 0.3, 0.3, None)));
        layer.use_text(text, CAPTION_FONT_SIZE, Mm::from(Pt(x)), Mm::from(Pt(y)), font);
    }

    /// Serialize the assembled document; failures here are fatal per group
    fn save(&self, doc: printpdf::PdfDocumentReference, path: &Path) -> ExpenseResult<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let file = File::create(path).map_err(|e| {
            ExpenseError::Io(format!("Failed to create {}: {}", path.display(), e))
        })?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| ExpenseError::Pdf(format!("Failed to write {}: {}", path.display(), e)))
    }
}
