//! Per-frame Canvas-2D compositing of the particle field, pointer glows,
//! inter-node connections, and the transient effect layers.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use quantum_core::constants::RIPPLE_EXTENT_FACTOR;
use quantum_core::Scene;

use crate::constants::*;
use crate::dom::{self, Palette};

/// Everything drawn as a glowing node: particles, the local pointer, and
/// remote pointer proxies.
struct Node {
    pos: Vec2,
    radius: f32,
    glow_mult: f32,
    intensity: f32,
}

pub struct Renderer {
    ctx: web::CanvasRenderingContext2d,
    palette: Palette,
    width: f32,
    height: f32,
}

impl Renderer {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("canvas context error: {e:?}"))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("context cast error: {e:?}"))?;
        Ok(Self {
            ctx,
            palette: dom::derive_palette(),
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        })
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Resize the backing store; returns the CSS-pixel viewport the scene
    /// should run in.
    pub fn resize(&mut self, canvas: &web::HtmlCanvasElement) -> (f32, f32) {
        let (w, h) = dom::sync_canvas_size(canvas, &self.ctx);
        self.width = w;
        self.height = h;
        (w, h)
    }

    pub fn render(&self, scene: &Scene) -> Result<(), JsValue> {
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);

        let nodes = self.collect_nodes(scene);
        self.draw_glows(&nodes)?;
        self.draw_connections(scene, &nodes)?;
        self.draw_traces(scene)?;
        self.draw_pulses(scene)?;
        self.draw_ripples(scene)?;
        Ok(())
    }

    fn collect_nodes(&self, scene: &Scene) -> Vec<Node> {
        let mut nodes: Vec<Node> = scene
            .field
            .particles
            .iter()
            .map(|p| Node {
                pos: p.pos,
                radius: p.radius,
                glow_mult: GLOW_PARTICLE_MULT,
                intensity: 0.7 + 0.3 * p.depth,
            })
            .collect();
        if scene.pointer.visible(scene.clock_ms(), scene.focused) {
            nodes.push(Node {
                pos: scene.pointer.pos,
                radius: POINTER_NODE_RADIUS,
                glow_mult: GLOW_POINTER_MULT,
                intensity: 1.0 + 0.5 * scene.pointer.charge,
            });
        }
        for r in scene.remotes.visible() {
            nodes.push(Node {
                pos: r.pos,
                radius: POINTER_NODE_RADIUS,
                glow_mult: GLOW_REMOTE_MULT,
                intensity: 0.8 + 0.5 * r.charge,
            });
        }
        nodes
    }

    fn draw_glows(&self, nodes: &[Node]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_composite_operation("lighter")?;
        for node in nodes {
            let radius = (node.radius * node.glow_mult) as f64;
            let (x, y) = (node.pos.x as f64, node.pos.y as f64);
            let gradient = ctx.create_radial_gradient(x, y, 0.0, x, y, radius * 3.0)?;
            gradient.add_color_stop(0.0, &self.palette.glow)?;
            gradient.add_color_stop(0.65, &self.palette.glow_secondary)?;
            gradient.add_color_stop(1.0, "transparent")?;
            ctx.set_global_alpha((GLOW_BASE_ALPHA * node.intensity).min(1.0) as f64);
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.set_shadow_color(&self.palette.glow_secondary);
            ctx.set_shadow_blur(GLOW_SHADOW_BLUR * node.intensity as f64);
            ctx.begin_path();
            ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU)?;
            ctx.fill();
        }
        ctx.restore();
        Ok(())
    }

    /// Connections across up to three parallax layers, each with its own
    /// alpha/width/phase swing. Pair cost is bounded by the detail
    /// governor's neighbor cap, stride, and global attempt budget.
    fn draw_connections(&self, scene: &Scene, nodes: &[Node]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let limit = scene.max_distance();
        let limit_sq = limit * limit;
        let cap = scene.detail.neighbor_cap();
        let stride = scene.detail.connection_stride();
        let mut budget = scene.detail.attempt_budget();
        let t = (scene.clock_ms() / 1000.0) as f32;
        let layers = scene.detail.parallax_layers();

        ctx.save();
        for (layer, (base_alpha, line_width, phase)) in
            PARALLAX_LAYERS.iter().take(layers).enumerate()
        {
            let swing = PARALLAX_ALPHA_SWING * (t * 0.7 + phase).sin();
            let wobble = layer as f32 * PARALLAX_WOBBLE_PX * (t * 0.5 + phase).sin();
            ctx.set_line_width(*line_width as f64);

            'outer: for i in 0..nodes.len() {
                let mut neighbors = 0usize;
                for j in ((i + 1)..nodes.len()).step_by(stride) {
                    if budget == 0 {
                        break 'outer;
                    }
                    budget -= 1;
                    let a = &nodes[i];
                    let b = &nodes[j];
                    let d = a.pos - b.pos;
                    let dist_sq = d.length_squared();
                    if dist_sq > limit_sq {
                        continue;
                    }
                    let dist = dist_sq.sqrt();
                    let alpha = (1.0 - dist / limit) * (base_alpha + swing).max(0.05);
                    let gradient = ctx.create_linear_gradient(
                        a.pos.x as f64,
                        (a.pos.y + wobble) as f64,
                        b.pos.x as f64,
                        (b.pos.y + wobble) as f64,
                    );
                    gradient.add_color_stop(0.0, &self.palette.glow)?;
                    gradient.add_color_stop(1.0, &self.palette.glow_secondary)?;
                    ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
                    ctx.set_stroke_style_canvas_gradient(&gradient);
                    ctx.begin_path();
                    ctx.move_to(a.pos.x as f64, (a.pos.y + wobble) as f64);
                    ctx.line_to(b.pos.x as f64, (b.pos.y + wobble) as f64);
                    ctx.stroke();
                    neighbors += 1;
                    if neighbors >= cap {
                        break;
                    }
                }
            }
        }
        ctx.restore();
        Ok(())
    }

    fn draw_pulses(&self, scene: &Scene) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_composite_operation("lighter")?;
        for p in &scene.effects.pulses {
            ctx.set_global_alpha(p.alpha as f64);
            ctx.set_stroke_style_str(&self.palette.glow);
            ctx.set_line_width((1.5 + p.strength) as f64);
            ctx.set_shadow_color(&self.palette.glow_secondary);
            ctx.set_shadow_blur(12.0);
            ctx.begin_path();
            ctx.arc(
                p.pos.x as f64,
                p.pos.y as f64,
                p.radius as f64,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.stroke();
        }
        ctx.restore();
        Ok(())
    }

    fn draw_ripples(&self, scene: &Scene) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let extent = (self.width * self.height).sqrt() * RIPPLE_EXTENT_FACTOR;
        ctx.save();
        ctx.set_global_composite_operation("lighter")?;
        for r in &scene.effects.ripples {
            // Staggered fronts only surface once their progress passes zero.
            if r.progress <= 0.0 {
                continue;
            }
            let alpha = (1.0 - r.progress).max(0.0) * (0.3 + 0.4 * r.strength);
            if alpha <= 0.0 {
                continue;
            }
            ctx.set_global_alpha(alpha.min(1.0) as f64);
            ctx.set_stroke_style_str(if r.remote {
                &self.palette.glow_secondary
            } else {
                &self.palette.glow
            });
            ctx.set_line_width((0.8 + r.strength) as f64);
            ctx.begin_path();
            ctx.arc(
                r.pos.x as f64,
                r.pos.y as f64,
                (r.progress * extent) as f64,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.stroke();
        }
        ctx.restore();
        Ok(())
    }

    fn draw_traces(&self, scene: &Scene) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_composite_operation("lighter")?;
        ctx.set_line_cap("round");
        for tr in &scene.effects.traces {
            ctx.set_global_alpha(tr.alpha as f64);
            ctx.set_stroke_style_str(&self.palette.glow_secondary);
            ctx.set_line_width(tr.thickness as f64);
            ctx.set_shadow_color(&self.palette.glow);
            ctx.set_shadow_blur(10.0);
            ctx.begin_path();
            ctx.arc(
                tr.pos.x as f64,
                tr.pos.y as f64,
                tr.radius as f64,
                tr.rotation as f64,
                (tr.rotation + tr.span) as f64,
            )?;
            ctx.stroke();
        }
        ctx.restore();
        Ok(())
    }
}
