pub const MAX_TILT_DEG: f64 = 8.0;
pub const TILT_PERSPECTIVE_PX: f64 = 1000.0;
pub const HOVER_SCALE: f64 = 1.05;
pub const HOVER_SHADOW: &str = "0 15px 30px rgba(0,0,0,0.3)";
pub const REST_SHADOW: &str = "none";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Rotation and scale applied to a hovered card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
    pub scale: f64,
    pub raised: bool,
}

impl Default for Tilt {
    fn default() -> Self {
        Self::REST
    }
}

impl Tilt {
    pub const REST: Tilt = Tilt {
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
        scale: 1.0,
        raised: false,
    };

    /// The card leans away from the pointer: pointer at the top edge gives
    /// `+MAX_TILT_DEG` around X, pointer at the right edge `+MAX_TILT_DEG`
    /// around Y.
    pub fn from_pointer(rect: CardRect, client_x: f64, client_y: f64) -> Self {
        if !(rect.width > 0.0 && rect.height > 0.0) {
            return Self::REST;
        }
        let u = ((client_x - rect.left) / rect.width).clamp(0.0, 1.0);
        let v = ((client_y - rect.top) / rect.height).clamp(0.0, 1.0);
        Self {
            rotate_x_deg: MAX_TILT_DEG * (v - 0.5) * -2.0,
            rotate_y_deg: MAX_TILT_DEG * (u - 0.5) * 2.0,
            scale: HOVER_SCALE,
            raised: true,
        }
    }

    pub fn transform_css(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale3d({}, {}, {})",
            fmt_f64(TILT_PERSPECTIVE_PX),
            fmt_f64(self.rotate_x_deg),
            fmt_f64(self.rotate_y_deg),
            fmt_f64(self.scale),
            fmt_f64(self.scale),
            fmt_f64(self.scale),
        )
    }

    pub fn shadow_css(&self) -> &'static str {
        if self.raised {
            HOVER_SHADOW
        } else {
            REST_SHADOW
        }
    }
}

fn fmt_f64(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // avoid "-0" in the style string
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}
