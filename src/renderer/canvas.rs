//! Snapshot drawing on a 2D canvas context

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::GROUND_TILE;
use crate::sim::{ObstacleView, Snapshot};

const SKY: &str = "#70c5ce";
const GATE: &str = "#73bf2e";
const GATE_EDGE: &str = "#000";
const GROUND: &str = "#ded895";
const GROUND_STRIPE: &str = "#c9c27a";
const AVATAR: &str = "#ffeb3b";

/// Draws snapshots onto a canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Canvas pixels per playfield unit
    scale: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx, scale: 1.0 })
    }

    /// Device pixel ratio (the playfield is in CSS pixels)
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.max(0.1);
    }

    pub fn render(&self, snap: &Snapshot) {
        let ctx = &self.ctx;
        let field = &snap.playfield;
        let floor = f64::from(field.floor_y());

        ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0)
            .ok();

        ctx.set_fill_style_str(SKY);
        ctx.fill_rect(0.0, 0.0, f64::from(field.width), floor);

        for gate in &snap.obstacles {
            self.draw_gate(gate);
        }

        // Ground strip with scrolling stripes
        ctx.set_fill_style_str(GROUND);
        ctx.fill_rect(
            0.0,
            floor,
            f64::from(field.width),
            f64::from(field.ground_height),
        );
        ctx.set_fill_style_str(GROUND_STRIPE);
        let tile = f64::from(GROUND_TILE);
        let mut x = -f64::from(snap.ground_offset);
        while x < f64::from(field.width) {
            ctx.fill_rect(x, floor, tile / 2.0, 8.0);
            x += tile;
        }

        let avatar = &snap.avatar;
        ctx.set_fill_style_str(AVATAR);
        ctx.set_stroke_style_str(GATE_EDGE);
        ctx.fill_rect(
            f64::from(avatar.x),
            f64::from(avatar.y),
            f64::from(avatar.width),
            f64::from(avatar.height),
        );
        ctx.stroke_rect(
            f64::from(avatar.x),
            f64::from(avatar.y),
            f64::from(avatar.width),
            f64::from(avatar.height),
        );
    }

    fn draw_gate(&self, gate: &ObstacleView) {
        let ctx = &self.ctx;
        let x = f64::from(gate.x);
        let w = f64::from(gate.width);
        let top_h = f64::from(gate.gap_top);
        let bottom_y = f64::from(gate.gap_bottom);
        let bottom_h = (f64::from(gate.floor) - bottom_y).max(0.0);

        ctx.set_fill_style_str(GATE);
        ctx.set_stroke_style_str(GATE_EDGE);
        ctx.fill_rect(x, 0.0, w, top_h);
        ctx.stroke_rect(x, 0.0, w, top_h);
        ctx.fill_rect(x, bottom_y, w, bottom_h);
        ctx.stroke_rect(x, bottom_y, w, bottom_h);
    }
}
