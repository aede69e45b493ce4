//! Canvas 2D renderer
//!
//! Sprites load asynchronously; until one is ready its fallback shape is
//! drawn instead.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::Renderer;
use super::hud::{HudLayout, StatusLine};
use crate::error::RenderError;
use crate::settings::{CatcherSkin, Settings};
use crate::sim::{SauceDrop, SauceKind, SessionPhase, SessionState};

const HUD_FONT: &str = "bold 20px Rubik, sans-serif";
const HEART_FONT: &str = "24px Arial";
const HEART: &str = "\u{2764}\u{fe0f}";

fn draw_err(e: JsValue) -> RenderError {
    RenderError::Draw(format!("{e:?}"))
}

fn load_image(src: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    img.set_src(src);
    Some(img)
}

fn ready(img: &Option<HtmlImageElement>) -> Option<&HtmlImageElement> {
    img.as_ref().filter(|i| i.complete() && i.natural_width() > 0)
}

struct Sprites {
    taco: Option<HtmlImageElement>,
    wing: Option<HtmlImageElement>,
    mild: Option<HtmlImageElement>,
    hot: Option<HtmlImageElement>,
    extra_hot: Option<HtmlImageElement>,
}

impl Sprites {
    fn load() -> Self {
        Self {
            taco: load_image(CatcherSkin::Taco.sprite_path()),
            wing: load_image(CatcherSkin::Wing.sprite_path()),
            mild: load_image("assets/milddrip.png"),
            hot: load_image("assets/mediumdrip.png"),
            extra_hot: load_image("assets/hotdrip.png"),
        }
    }

    /// Every image has finished loading or failed
    fn settled(&self) -> bool {
        [&self.taco, &self.wing, &self.mild, &self.hot, &self.extra_hot]
            .into_iter()
            .flatten()
            .all(|img| img.complete())
    }

    fn catcher(&self, skin: CatcherSkin) -> Option<&HtmlImageElement> {
        match skin {
            CatcherSkin::Taco => ready(&self.taco),
            CatcherSkin::Wing => ready(&self.wing),
        }
    }

    fn drop(&self, kind: SauceKind) -> Option<&HtmlImageElement> {
        match kind {
            SauceKind::Mild => ready(&self.mild),
            SauceKind::Hot => ready(&self.hot),
            SauceKind::ExtraHot => ready(&self.extra_hot),
        }
    }
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
    skin: CatcherSkin,
    flashes: bool,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, settings: &Settings) -> Result<Self, RenderError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(draw_err)?
            .ok_or(RenderError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::ContextUnavailable)?;
        Ok(Self {
            ctx,
            sprites: Sprites::load(),
            skin: settings.skin,
            flashes: settings.effective_flashes(),
        })
    }

    pub fn set_skin(&mut self, skin: CatcherSkin) {
        self.skin = skin;
    }

    /// Whether sprite loading is over (failed sprites fall back to shapes)
    pub fn sprites_settled(&self) -> bool {
        self.sprites.settled()
    }

    fn veil(&self, style: &str, state: &SessionState) {
        self.ctx.set_fill_style_str(style);
        self.ctx
            .fill_rect(0.0, 0.0, state.field.x as f64, state.field.y as f64);
    }

    fn centered_text(&self, text: &str, font: &str, style: &str, state: &SessionState) -> Result<(), RenderError> {
        let center = state.field_center();
        self.ctx.set_fill_style_str(style);
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        let result = self.ctx.fill_text(text, center.x as f64, center.y as f64);
        self.ctx.set_text_align("left");
        result.map_err(draw_err)
    }

    fn draw_drop(&self, drop: &SauceDrop) -> Result<(), RenderError> {
        let (x, y) = (drop.pos.x as f64, drop.pos.y as f64);
        let (w, h) = (drop.size.x as f64, drop.size.y as f64);
        if let Some(img) = self.sprites.drop(drop.kind) {
            return self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                .map_err(draw_err);
        }
        // Fallback: colored triangle
        self.ctx.set_fill_style_str(drop.kind.color());
        self.ctx.begin_path();
        self.ctx.move_to(x + w / 2.0, y);
        self.ctx.line_to(x + w, y + h);
        self.ctx.line_to(x, y + h);
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }

    fn draw_scene(&self, state: &SessionState) -> Result<(), RenderError> {
        let c = &state.catcher;
        let (cx, cy, cw, ch) = (c.pos.x as f64, c.pos.y as f64, c.size.x as f64, c.size.y as f64);
        match self.sprites.catcher(self.skin) {
            Some(img) => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, cx, cy, cw, ch)
                .map_err(draw_err)?,
            None => {
                self.ctx.set_fill_style_str("#f1c40f");
                self.ctx.fill_rect(cx, cy, cw, ch);
            }
        }

        for drop in &state.drops {
            self.draw_drop(drop)?;
        }

        self.ctx.set_font(HUD_FONT);
        for callout in &state.callouts {
            self.ctx
                .set_fill_style_str(&format!("rgba(255, 255, 255, {})", callout.life.clamp(0.0, 1.0)));
            self.ctx
                .fill_text(&callout.kind.to_string(), callout.pos.x as f64, callout.pos.y as f64)
                .map_err(draw_err)?;
        }

        let hud = HudLayout::build(state);
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str("#FFFFFF");
        for (text, pos) in [&hud.score, &hud.level] {
            self.ctx
                .fill_text(text, pos.x as f64, pos.y as f64)
                .map_err(draw_err)?;
        }

        self.ctx.set_font(HEART_FONT);
        for pos in &hud.hearts {
            self.ctx
                .fill_text(HEART, pos.x as f64, pos.y as f64)
                .map_err(draw_err)?;
        }
        if state.heart.active {
            self.ctx
                .fill_text(HEART, state.heart.pos.x as f64, state.heart.pos.y as f64)
                .map_err(draw_err)?;
        }

        if let Some((line, pos)) = &hud.status {
            let text = match line {
                StatusLine::Multiplier { text } => {
                    self.ctx.set_fill_style_str("#FFD700");
                    self.ctx.set_font("bold 24px Rubik, sans-serif");
                    text
                }
                StatusLine::Streak { text } => {
                    self.ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
                    self.ctx.set_font("20px Rubik, sans-serif");
                    text
                }
            };
            self.ctx
                .fill_text(text, pos.x as f64, pos.y as f64)
                .map_err(draw_err)?;
        }
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, state: &SessionState) -> Result<(), RenderError> {
        self.ctx
            .clear_rect(0.0, 0.0, state.field.x as f64, state.field.y as f64);
        self.draw_scene(state)?;

        if self.flashes && state.miss_overlay > 0.0 {
            self.veil(&format!("rgba(255, 0, 0, {})", state.miss_overlay), state);
        }

        if let Some(warning) = &state.life_warning {
            let opacity = warning.opacity();
            if self.flashes {
                self.veil(&format!("rgba(255, 0, 0, {})", opacity * 0.3), state);
            }
            self.centered_text(
                &warning.message(),
                "bold 32px Arial",
                &format!("rgba(255, 255, 255, {opacity})"),
                state,
            )?;
        }

        if let Some(banner) = &state.level_banner {
            let alpha = banner.life.clamp(0.0, 1.0);
            self.centered_text(
                &format!("Level {}!", banner.level),
                "bold 48px Rubik, sans-serif",
                &format!("rgba(255, 215, 0, {alpha})"),
                state,
            )?;
        }

        if state.phase == SessionPhase::Paused {
            self.veil("rgba(0, 0, 0, 0.5)", state);
            self.centered_text("PAUSED", "bold 48px Arial", "#fff", state)?;
        }
        Ok(())
    }
}
