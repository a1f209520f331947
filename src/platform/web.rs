//! Browser implementations of the platform traits
//!
//! `CanvasSurface` draws on a 2D canvas context, `WebSound` wraps an
//! `<audio>` element and `PerformanceClock` reads `performance.now()`.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlAudioElement, HtmlImageElement, Performance};

use super::Clock;
use crate::audio::Playable;
use crate::renderer::{Color, ImageHandle, Surface, colors};

const FONT_FAMILY: &str = "sans-serif";

/// Where assets are served from, relative to the page
pub fn image_url(name: &str) -> String {
    format!("assets/images/{}", name)
}

pub fn sfx_url(name: &str) -> String {
    format!("assets/sounds/{}.mp3", name)
}

pub fn music_url(name: &str) -> String {
    format!("assets/music/{}.mp3", name)
}

/// Image elements indexed by `ImageHandle`
pub type ImageTable = Rc<RefCell<Vec<HtmlImageElement>>>;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
    images: ImageTable,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, size: Vec2, images: ImageTable) -> Self {
        Self { ctx, size, images }
    }

    fn outline(&self, weight: f32) {
        self.ctx.set_line_width(weight as f64);
        self.ctx.set_stroke_style_str(&colors::BLACK.to_css());
    }
}

impl Surface for CanvasSurface {
    fn background(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn rect(&mut self, origin: Vec2, size: Vec2, fill: Color, stroke_weight: f32) {
        let (x, y, w, h) = (origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
        self.ctx.set_fill_style_str(&fill.to_css());
        self.ctx.fill_rect(x, y, w, h);
        self.outline(stroke_weight);
        self.ctx.stroke_rect(x, y, w, h);
    }

    fn circle(&mut self, center: Vec2, diameter: f32, fill: Color) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            diameter as f64 / 2.0,
            0.0,
            TAU,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.set_fill_style_str(&fill.to_css());
        self.ctx.fill();
        self.outline(1.0);
        self.ctx.stroke();
    }

    fn image(&mut self, image: ImageHandle, origin: Vec2, size: Vec2) {
        let images = self.images.borrow();
        let Some(element) = images.get(image.0 as usize) else {
            log::error!("Unknown image handle {:?}", image);
            return;
        };
        let drawn = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            element,
            origin.x as f64,
            origin.y as f64,
            size.x as f64,
            size.y as f64,
        );
        if let Err(e) = drawn {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn text(&mut self, text: &str, center: Vec2, size: f32, fill: Color) {
        self.ctx.set_font(&format!("{}px {}", size, FONT_FAMILY));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&fill.to_css());
        let _ = self.ctx.fill_text(text, center.x as f64, center.y as f64);
    }
}

/// One `<audio>` element
pub struct WebSound {
    element: HtmlAudioElement,
}

impl WebSound {
    pub fn new(element: HtmlAudioElement) -> Self {
        Self { element }
    }

    fn start(&self, looped: bool) {
        self.element.set_loop(looped);
        self.element.set_current_time(0.0);
        // Rejected by autoplay policy until the page has seen a click
        if let Err(e) = self.element.play() {
            log::warn!("play() rejected: {:?}", e);
        }
    }
}

impl Playable for WebSound {
    fn play(&self) {
        self.start(false);
    }

    fn play_looped(&self) {
        self.start(true);
    }

    fn stop(&self) {
        let _ = self.element.pause();
        self.element.set_current_time(0.0);
    }

    fn is_playing(&self) -> bool {
        !self.element.paused()
    }

    fn set_volume(&self, volume: f32) {
        self.element.set_volume(volume.clamp(0.0, 1.0) as f64);
    }
}

pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        let performance = web_sys::window().and_then(|w| w.performance());
        if performance.is_none() {
            log::warn!("performance.now() unavailable, falling back to Date.now()");
        }
        Self { performance }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        }
    }
}
