//! Module implementing the actual captioning task.
//! Most if not all captioning logic lives here.

use std::ops::Deref;
use std::sync::Arc;

use image::RgbaImage;
use unicode_normalization::UnicodeNormalization;

use crate::model::{BoxPosition, RenderRequest, Template,
                   DEFAULT_COLOR, DEFAULT_FONT, DEFAULT_OUTLINE_COLOR, DEFAULT_STROKE_WIDTH};
use crate::resources::{LoadError, Loader, TemplateRegistry};
use crate::text::{self, TextStyle};
use super::distribute::distribute;
use super::engine;
use super::error::CaptionError;
use super::layout::{fallback_box, template_layout};
use super::output::RenderedImage;


/// Represents a single captioning task and contains all the relevant logic.
///
/// All the code here is executed synchronously in the calling thread.
pub(super) struct CaptionTask<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    request: RenderRequest,
    engine: Arc<engine::Inner<R, Il>>,
}

impl<R, Il> Deref for CaptionTask<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    type Target = RenderRequest;
    fn deref(&self) -> &Self::Target {
        &self.request  // makes the rendering code a little terser
    }
}

impl<R, Il> CaptionTask<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    #[inline]
    pub fn new(request: RenderRequest, engine: Arc<engine::Inner<R, Il>>) -> Self {
        CaptionTask{request, engine}
    }
}

impl<R, Il> CaptionTask<R, Il>
    where R: TemplateRegistry, Il: Loader<Item=RgbaImage, Err=LoadError>
{
    /// Perform the captioning task.
    ///
    /// Any failure aborts the whole task and no output file is written.
    pub fn perform(self) -> Result<RenderedImage, CaptionError> {
        debug!("Rendering {:?}", self.request);
        self.validate()?;

        let template = self.engine.registry.get(&self.template_id)
            .ok_or_else(|| CaptionError::NotFound(self.template_id.clone()))?;
        trace!("Using {:?}", template);

        // Everything that can be checked without the image is checked first.
        let texts = self.box_texts(template)?;
        if texts.iter().all(|t| t.is_empty()) {
            return Err(CaptionError::Validation("no box has any text to render".into()));
        }

        let mut img = self.engine.images.load(&template.image).map_err(|e| {
            error!("Failed to load image `{}` of template `{}`: {}",
                template.image, template.id, e);
            CaptionError::Load{reference: template.image.clone(), source: e}
        })?;
        let (width, height) = img.dimensions();

        let font_size = self.max_font_size.unwrap_or_else(|| template.font_size());
        let rects = self.box_rects(template, texts.len(), width, height, font_size);

        let config = &self.engine.config;
        let font_name = self.font.as_deref()
            .or_else(|| template.font.as_deref())
            .unwrap_or(DEFAULT_FONT);
        let font = self.engine.fonts.resolve(Some(font_name), font_size as f32, config.strict_fonts)
            .map_err(|e| CaptionError::font(font_name, e))?;
        debug!("Rendering {} box(es) with {:?} at {}px", texts.len(), font, font.size());

        let mut boxes = Vec::with_capacity(texts.len());
        for (i, (text, rect)) in texts.iter().zip(rects).enumerate() {
            if text.is_empty() {
                trace!("Box #{} has no text, skipping", i);
                continue;
            }
            font.check(text);
            let style = self.box_style(template, i);
            let lines = text::wrap(text, &font, rect.width as f32);
            let outcome = text::render_box(
                &mut img, &font, &lines, rect, config.horizontal_anchor, &style);
            trace!("Box #{} rendered: {:?}", i, outcome);
            boxes.push(outcome);
        }

        let (path, filename, format) = self.engine.output.persist(
            &img, self.filename.as_deref(), config.jpeg_quality)?;
        Ok(RenderedImage::new(path, filename, format, (width, height), boxes))
    }

    /// Determine the (normalized) text of every box to render.
    fn box_texts(&self, template: &Template) -> Result<Vec<String>, CaptionError> {
        match self.caption {
            Some(ref caption) => {
                let caption: String = caption.nfc().collect();
                distribute(&caption, template.box_count, template.positions())
            }
            None => Ok(self.boxes.iter()
                .map(|b| b.text.nfc().collect::<String>().trim().to_owned())
                .collect()),
        }
    }

    /// Determine the rectangle of every box to render.
    ///
    /// Boxes from the request override the coordinates of the template's layout
    /// (whether explicit or synthesized). Those beyond the layout
    /// are placed at the top or bottom of the image.
    fn box_rects(&self, template: &Template, count: usize,
                 width: u32, height: u32, font_size: u32) -> Vec<BoxPosition> {
        let layout = template_layout(template, width, height);
        (0..count).map(|i| {
            let base = layout.get(i).copied()
                .unwrap_or_else(|| fallback_box(i, width, height, font_size));
            match self.boxes.get(i) {
                Some(spec) if spec.has_geometry() => {
                    let rect = spec.place(base);
                    trace!("Box #{} moved from {} to {}", i + 1, base, rect);
                    rect
                }
                _ => base,
            }
        }).collect()
    }

    /// Determine the text style of given box,
    /// looking at the box itself, then the request, and finally the template.
    fn box_style(&self, template: &Template, index: usize) -> TextStyle {
        let spec = self.boxes.get(index);
        TextStyle::new(
            spec.and_then(|b| b.color)
                .or(self.color).or(template.color)
                .unwrap_or(DEFAULT_COLOR),
            spec.and_then(|b| b.outline_color)
                .or(self.outline_color).or(template.outline_color)
                .unwrap_or(DEFAULT_OUTLINE_COLOR),
            spec.and_then(|b| b.stroke_width)
                .or(self.stroke_width).or(template.stroke_width)
                .unwrap_or(DEFAULT_STROKE_WIDTH))
    }
}
