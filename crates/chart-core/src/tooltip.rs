// File: crates/chart-core/src/tooltip.rs
// Summary: Shared tooltip overlay: one element per chart, faded in/out, never reallocated.

use std::time::Duration;

use crate::geometry::{Point, RectF};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipConfig {
    pub width: f32,
    pub height: f32,
    /// Gap between the anchor point and the bottom of the box.
    pub offset: f32,
    pub corner_radius: f32,
    pub font_size: f32,
    pub fade: Duration,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            width: 152.0,
            height: 40.0,
            offset: 10.0,
            corner_radius: 6.0,
            font_size: 12.0,
            fade: Duration::from_millis(120),
        }
    }
}

/// Where the overlay is heading; the opacity may still be mid-fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    elapsed: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipOverlay {
    config: TooltipConfig,
    text: String,
    /// Top-left of the box, inner coordinates.
    origin: Point,
    opacity: f32,
    target: Visibility,
    fade: Option<Fade>,
}

impl TooltipOverlay {
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            text: String::new(),
            origin: Point::default(),
            opacity: 0.0,
            target: Visibility::Hidden,
            fade: None,
        }
    }

    /// Show `text` centered above `(x, y)`. Supersedes any in-flight fade.
    pub fn show(&mut self, text: impl Into<String>, x: f32, y: f32) {
        self.text = text.into();
        self.origin = Point::new(
            x - self.config.width / 2.0,
            y - self.config.height - self.config.offset,
        );
        self.fade_to(Visibility::Visible);
    }

    /// Fade out; the text and position are kept for the next show.
    pub fn hide(&mut self) {
        self.fade_to(Visibility::Hidden);
    }

    fn fade_to(&mut self, target: Visibility) {
        self.target = target;
        let to = match target {
            Visibility::Visible => 1.0,
            Visibility::Hidden => 0.0,
        };
        self.fade = if self.config.fade.is_zero() {
            self.opacity = to;
            None
        } else if (self.opacity - to).abs() < f32::EPSILON {
            None
        } else {
            Some(Fade { from: self.opacity, to, elapsed: Duration::ZERO })
        };
    }

    /// Step the fade by `dt`. Returns true while a fade is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(mut fade) = self.fade else { return false };
        fade.elapsed += dt;
        let t = (fade.elapsed.as_secs_f32() / self.config.fade.as_secs_f32()).min(1.0);
        self.opacity = fade.from + (fade.to - fade.from) * t;
        if t >= 1.0 {
            self.opacity = fade.to;
            self.fade = None;
            false
        } else {
            self.fade = Some(fade);
            true
        }
    }

    /// Jump to the end of any running fade.
    pub fn settle(&mut self) {
        if let Some(f) = self.fade.take() {
            self.opacity = f.to;
        }
    }

    pub fn visibility(&self) -> Visibility { self.target }
    pub fn is_visible(&self) -> bool { self.target == Visibility::Visible }
    pub fn is_animating(&self) -> bool { self.fade.is_some() }
    pub fn opacity(&self) -> f32 { self.opacity }
    pub fn text(&self) -> &str { &self.text }
    pub fn origin(&self) -> Point { self.origin }
    pub fn config(&self) -> &TooltipConfig { &self.config }

    pub fn bounds(&self) -> RectF {
        RectF::from_ltwh(self.origin.x, self.origin.y, self.config.width, self.config.height)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration { Duration::from_millis(v) }

    #[test]
    fn starts_hidden_and_transparent() {
        let t = TooltipOverlay::new(TooltipConfig::default());
        assert!(!t.is_visible());
        assert_eq!(t.opacity(), 0.0);
    }

    #[test]
    fn show_positions_box_above_anchor() {
        let mut t = TooltipOverlay::new(TooltipConfig::default());
        t.show("2020: $45.0 /MWh", 100.0, 200.0);
        assert_eq!(t.origin(), Point::new(24.0, 150.0));
        assert!(t.is_visible());
        assert!(t.advance(ms(60)));
        assert!((t.opacity() - 0.5).abs() < 1e-3);
        assert!(!t.advance(ms(60)));
        assert_eq!(t.opacity(), 1.0);
    }

    #[test]
    fn show_supersedes_in_flight_hide() {
        let mut t = TooltipOverlay::new(TooltipConfig::default());
        t.show("a", 10.0, 10.0);
        t.settle();
        t.hide();
        t.advance(ms(30));
        t.show("b", 50.0, 60.0);
        assert!(t.is_visible());
        assert_eq!(t.text(), "b");
        assert_eq!(t.origin(), Point::new(-26.0, 10.0));
        t.advance(ms(500));
        assert_eq!(t.opacity(), 1.0);
    }

    #[test]
    fn hide_keeps_the_element() {
        let mut t = TooltipOverlay::new(TooltipConfig::default());
        t.show("x\ny", 0.0, 0.0);
        t.hide();
        t.settle();
        assert_eq!(t.opacity(), 0.0);
        assert_eq!(t.lines().collect::<Vec<_>>(), ["x", "y"]);
    }
}
