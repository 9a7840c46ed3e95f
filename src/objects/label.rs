//=========================================================================
// Label
//=========================================================================
//
// A line of text. Placed by its top-left `position`, or centred on an
// `area` given as `[x, y, w, h]`. `blink` toggles it on and off.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::collision::Vec2;
use crate::core::entity::{priority, GameObject, ObjectContext, Visibility};
use crate::core::render::{text_width, Color, Surface};
use crate::core::scene::{BuildContext, InvokeError, ParamError, Params, Value};

pub const DEFAULT_TEXT_SIZE: f32 = 64.0;

//=== Label ===============================================================

#[derive(Debug)]
pub struct Label {
    text: String,
    at: Vec2,
    size: f32,
    color: Color,
    visibility: Visibility,
    lit: bool,
}

impl Label {
    pub fn from_params(params: &mut Params, _ctx: &mut BuildContext<'_>) -> Result<Self, ParamError> {
        let text = params.string("text")?;
        let size = params.float_or("size", DEFAULT_TEXT_SIZE)?;
        let at = match params.get("area") {
            Some(area) => {
                let area = rect_of(area).ok_or_else(|| ParamError::wrong_type("area", "[x, y, w, h]", area))?;
                centred_in(&text, size, area)
            }
            None => params.point_or("position", Vec2::ZERO)?,
        };
        Ok(Self {
            text,
            at,
            size,
            color: params.color_or("color", Color::WHITE)?,
            visibility: Visibility::default(),
            lit: true,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Vec2 {
        self.at
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn blink(&mut self) {
        self.lit = !self.lit;
    }
}

fn rect_of(value: &Value) -> Option<[f32; 4]> {
    match value {
        Value::List(items) if items.len() == 4 => {
            Some([items[0].as_f32()?, items[1].as_f32()?, items[2].as_f32()?, items[3].as_f32()?])
        }
        _ => None,
    }
}

/// Top-left corner for `text` centred on `((x + w) / 2, (y + h) / 2)`.
///
/// `w` and `h` are read as the far corner, so `[0, h/2, w, h]` centres on
/// the lower half.
fn centred_in(text: &str, size: f32, [x, y, w, h]: [f32; 4]) -> Vec2 {
    let center = Vec2::new((x + w) / 2.0, (y + h) / 2.0);
    Vec2::new(center.x - text_width(text, size) / 2.0, center.y - size / 2.0)
}

impl GameObject for Label {
    fn priority(&self) -> i32 {
        priority::UI
    }

    fn update(&mut self, _ctx: &mut ObjectContext<'_>) {}

    fn draw(&self, surface: &mut dyn Surface) {
        if self.lit {
            surface.draw_text(&self.text, self.at, self.size, self.color);
        }
    }

    fn visible(&self) -> bool {
        self.visibility.is_visible()
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "text" => Some(Value::Str(self.text.clone())),
            "position" => Some(self.at.into()),
            _ => None,
        }
    }

    fn invoke(&mut self, method: &str, args: &[Value], _ctx: &mut ObjectContext<'_>) -> Result<(), InvokeError> {
        match method {
            "blink" => self.blink(),
            "hide" => self.visibility.hide(),
            "show" => self.visibility.show(),
            "set_text" => {
                let text = args.first().and_then(Value::as_str).ok_or(ParamError::missing("text"))?;
                self.text = text.to_string();
            }
            _ => return Err(InvokeError::UnknownMethod),
        }
        Ok(())
    }
}

pub(crate) fn build(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Box<dyn GameObject>, ParamError> {
    Ok(Box::new(Label::from_params(params, ctx)?))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::DrawList;
    use crate::objects::testing::Harness;

    fn area(x: i64, y: i64, w: i64, h: i64) -> Value {
        Value::List(vec![Value::Int(x), Value::Int(y), Value::Int(w), Value::Int(h)])
    }

    #[test]
    fn centres_on_area() {
        let mut h = Harness::new(800.0, 600.0);
        let mut params = Params::new("Label").with("text", "ABCD").with("size", 10_i64).with("area", area(0, 0, 800, 300));
        let label = Label::from_params(&mut params, &mut h.build_ctx(1)).unwrap();
        // Width 4 * 10 * 0.6 = 24.
        assert_eq!(label.position(), Vec2::new(388.0, 145.0));
    }

    #[test]
    fn bad_area_is_rejected() {
        let mut h = Harness::new(800.0, 600.0);
        let mut params = Params::new("Label").with("text", "x").with("area", Value::List(vec![Value::Int(1)]));
        assert!(matches!(Label::from_params(&mut params, &mut h.build_ctx(1)), Err(ParamError::WrongType { .. })));
    }

    #[test]
    fn blink_toggles_drawing() {
        let mut h = Harness::new(800.0, 600.0);
        let mut params = Params::new("Label").with("text", "Press SPACE");
        let mut label = Label::from_params(&mut params, &mut h.build_ctx(1)).unwrap();
        let mut surface = DrawList::new(800, 600);

        label.invoke("blink", &[], &mut h.ctx(1, 0)).unwrap();
        assert!(!label.is_lit());
        label.draw(&mut surface);
        assert!(surface.pending().is_empty());

        label.invoke("blink", &[], &mut h.ctx(1, 0)).unwrap();
        label.draw(&mut surface);
        assert_eq!(surface.pending().len(), 1);
        assert!(label.visible());
    }

    #[test]
    fn unknown_methods_are_reported() {
        let mut h = Harness::new(800.0, 600.0);
        let mut params = Params::new("Label").with("text", "x");
        let mut label = Label::from_params(&mut params, &mut h.build_ctx(1)).unwrap();
        assert!(matches!(label.invoke("explode", &[], &mut h.ctx(1, 0)), Err(InvokeError::UnknownMethod)));
    }
}
