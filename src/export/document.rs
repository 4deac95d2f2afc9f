use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::{ExportError, ExportFile};
use crate::dashboard::detail::DetailView;

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.28;
/// Device pixels per CSS pixel when capturing the detail view.
pub const CAPTURE_SCALE: u32 = 2;

const IMAGE_NAME: &str = "Im0";

/// 8-bit RGB pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl RasterImage {
    fn validate(&self) -> Result<(), ExportError> {
        if self.width == 0 || self.height == 0 {
            return Err(ExportError::InvalidImage(format!("empty image({}x{})", self.width, self.height)));
        }
        let expected = self.width as usize * self.height as usize * 3;
        if self.rgb.len() != expected {
            return Err(ExportError::InvalidImage(format!("expected {} bytes of RGB data, got {}", expected, self.rgb.len())));
        }
        Ok(())
    }
}

/// Rasterizes the detail view as it is shown on screen.
pub trait RegionRenderer {
    fn render(&self, view: &DetailView, scale: u32) -> Result<RasterImage, ExportError>;
}

/// Page size in points: A4 width, height keeping the image's aspect ratio.
pub fn page_size(image: &RasterImage) -> (f32, f32) {
    (PAGE_WIDTH, image.height as f32 * PAGE_WIDTH / image.width as f32)
}

pub fn file_name(id: Option<i32>) -> String {
    match id {
        Some(id) => format!("application_{}.pdf", id),
        None => "application_download.pdf".into(),
    }
}

/// Builds a single-page PDF with the image covering the whole page.
pub fn compose_pdf(image: &RasterImage) -> Result<Vec<u8>, ExportError> {
    image.validate()?;
    let (width, height) = page_size(image);
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(image.width as i64),
            "Height" => Object::Integer(image.height as i64),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
        },
        image.rgb.clone(),
    ));
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![Object::Real(width), Object::Integer(0), Object::Integer(0), Object::Real(height), Object::Integer(0), Object::Integer(0)],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content.encode().map_err(|e| ExportError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Real(width), Object::Real(height)],
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                IMAGE_NAME => image_id,
            },
        },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}

/// Captures `view` and wraps the capture into `application_<id>.pdf`.
pub fn export<R>(renderer: &R, view: &DetailView, id: Option<i32>) -> Result<ExportFile, ExportError>
where
    R: RegionRenderer,
{
    let image = renderer.render(view, CAPTURE_SCALE)?;
    Ok(ExportFile {
        file_name: file_name(id),
        bytes: compose_pdf(&image)?,
    })
}
