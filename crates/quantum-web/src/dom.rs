use web_sys as web;

use crate::constants::*;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
pub fn local_storage() -> Option<web::Storage> {
    web::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Accent palette consumed by the renderer, re-derived on theme changes.
#[derive(Clone, Debug)]
pub struct Palette {
    pub glow: String,
    pub glow_secondary: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            glow: ACCENT_FALLBACK.to_owned(),
            glow_secondary: ACCENT_FALLBACK_2.to_owned(),
        }
    }
}

/// Read the accent custom properties off the body's computed style, with
/// literal fallbacks when the properties are unset or unreadable.
pub fn derive_palette() -> Palette {
    let Some((window, document)) = window_document() else {
        return Palette::default();
    };
    let Some(body) = document.body() else {
        return Palette::default();
    };
    let Ok(Some(computed)) = window.get_computed_style(&body) else {
        return Palette::default();
    };
    let read = |prop: &str, fallback: &str| -> String {
        match computed.get_property_value(prop) {
            Ok(v) if !v.trim().is_empty() => v.trim().to_owned(),
            _ => fallback.to_owned(),
        }
    };
    Palette {
        glow: read(ACCENT_PROPERTY, ACCENT_FALLBACK),
        glow_secondary: read(ACCENT_PROPERTY_2, ACCENT_FALLBACK_2),
    }
}

/// Size the canvas backing store to the viewport at the capped device pixel
/// ratio, pin its CSS size, and rescale the context transform. Returns the
/// CSS-pixel viewport dimensions the simulation runs in.
pub fn sync_canvas_size(
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
) -> (f32, f32) {
    let Some(window) = web::window() else {
        return (canvas.width() as f32, canvas.height() as f32);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let dpr = window.device_pixel_ratio().min(DPR_CAP).max(1.0);

    canvas.set_width((width * dpr) as u32);
    canvas.set_height((height * dpr) as u32);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{width}px"));
    let _ = style.set_property("height", &format!("{height}px"));

    let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    let _ = ctx.scale(dpr, dpr);

    (width as f32, height as f32)
}

#[inline]
pub fn reduced_motion_query() -> Option<web::MediaQueryList> {
    web::window().and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
}

#[inline]
pub fn reduced_motion_active() -> bool {
    reduced_motion_query().map(|q| q.matches()).unwrap_or(false)
}

/// Toggle the static marker class used by the reduced-motion styling.
pub fn set_reduced_marker(canvas: &web::HtmlCanvasElement, reduced: bool) {
    let classes = canvas.class_list();
    if reduced {
        let _ = classes.add_1(REDUCED_CLASS);
    } else {
        let _ = classes.remove_1(REDUCED_CLASS);
    }
}
