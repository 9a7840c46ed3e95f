//=========================================================================
// Score
//=========================================================================
//
// Eight-digit score counter with a session high score. Usually kept on
// the shared shelf so one counter survives scene changes.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::collision::Vec2;
use crate::core::entity::{priority, GameObject, ObjectContext};
use crate::core::render::{Color, Surface};
use crate::core::scene::{BuildContext, InvokeError, ParamError, Params, Value};

pub const DEFAULT_POSITION: Vec2 = Vec2::new(20.0, 5.0);
pub const DEFAULT_TEXT_SIZE: f32 = 24.0;

//=== Score ===============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    at: Vec2,
    size: f32,
    color: Color,
    score: i64,
    highscore: i64,
    show_highscore: bool,
}

impl Score {
    pub fn from_params(params: &mut Params, _ctx: &mut BuildContext<'_>) -> Result<Self, ParamError> {
        Ok(Self {
            at: params.point_or("position", DEFAULT_POSITION)?,
            size: params.float_or("size", DEFAULT_TEXT_SIZE)?,
            color: params.color_or("color", Color::WHITE)?,
            score: 0,
            highscore: 0,
            show_highscore: params.bool_or("highscore", false)?,
        })
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn highscore(&self) -> i64 {
        self.highscore
    }

    pub fn shows_highscore(&self) -> bool {
        self.show_highscore
    }

    /// Adds to the running score, raising the high score when passed.
    pub fn add(&mut self, points: i64) {
        self.score += points;
        self.highscore = self.highscore.max(self.score);
    }

    pub fn toggle_score(&mut self) {
        self.show_highscore = !self.show_highscore;
    }

    pub fn restart_score(&mut self) {
        self.score = 0;
    }

    pub fn restart(&mut self) {
        self.score = 0;
        self.highscore = 0;
    }

    /// Text drawn for the counter currently on display.
    pub fn text(&self) -> String {
        let value = if self.show_highscore { self.highscore } else { self.score };
        format!("{value:0>8}")
    }
}

impl GameObject for Score {
    fn priority(&self) -> i32 {
        priority::BACKGROUND - 10
    }

    fn update(&mut self, _ctx: &mut ObjectContext<'_>) {}

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_text(&self.text(), self.at, self.size, self.color);
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "score" => Some(Value::Int(self.score)),
            "highscore" => Some(Value::Int(self.highscore)),
            _ => None,
        }
    }

    fn invoke(&mut self, method: &str, args: &[Value], _ctx: &mut ObjectContext<'_>) -> Result<(), InvokeError> {
        match method {
            "add" => {
                let points = args.first().and_then(Value::as_i64).ok_or(ParamError::missing("points"))?;
                self.add(points);
            }
            "toggle_score" => self.toggle_score(),
            "restart_score" => self.restart_score(),
            "restart" => self.restart(),
            "display" => match args.first().and_then(Value::as_str) {
                Some("score") => self.show_highscore = false,
                Some("highscore") => self.show_highscore = true,
                Some(other) => {
                    return Err(ParamError::invalid("display", format!("unknown counter {other:?}")).into());
                }
                None => return Err(ParamError::missing("display").into()),
            },
            _ => return Err(InvokeError::UnknownMethod),
        }
        Ok(())
    }
}

pub(crate) fn build(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Box<dyn GameObject>, ParamError> {
    Ok(Box::new(Score::from_params(params, ctx)?))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{DrawCommand, DrawList};
    use crate::objects::testing::Harness;

    fn score(h: &mut Harness) -> Score {
        Score::from_params(&mut Params::new("Score"), &mut h.build_ctx(4)).unwrap()
    }

    #[test]
    fn highscore_follows_the_best_run() {
        let mut h = Harness::new(800.0, 600.0);
        let mut s = score(&mut h);
        s.add(300);
        s.restart_score();
        s.add(100);
        assert_eq!((s.score(), s.highscore()), (100, 300));
        s.add(250);
        assert_eq!((s.score(), s.highscore()), (350, 350));
        s.restart();
        assert_eq!((s.score(), s.highscore()), (0, 0));
    }

    #[test]
    fn draws_eight_padded_digits() {
        let mut h = Harness::new(800.0, 600.0);
        let mut s = score(&mut h);
        s.add(1200);
        let mut surface = DrawList::new(800, 600);
        s.draw(&mut surface);
        assert!(matches!(
            surface.pending(),
            [DrawCommand::Text { text, at, .. }] if text == "00001200" && *at == DEFAULT_POSITION
        ));
    }

    #[test]
    fn invoked_methods() {
        let mut h = Harness::new(800.0, 600.0);
        let mut s = score(&mut h);
        s.invoke("add", &[Value::Int(40)], &mut h.ctx(4, 0)).unwrap();
        s.invoke("restart_score", &[], &mut h.ctx(4, 0)).unwrap();
        assert_eq!(s.text(), "00000000");

        s.invoke("toggle_score", &[], &mut h.ctx(4, 0)).unwrap();
        assert_eq!(s.text(), "00000040");
        s.invoke("display", &[Value::from("score")], &mut h.ctx(4, 0)).unwrap();
        assert!(!s.shows_highscore());

        assert!(s.invoke("add", &[], &mut h.ctx(4, 0)).is_err());
        assert!(s.invoke("display", &[Value::from("lives")], &mut h.ctx(4, 0)).is_err());
        assert_eq!(s.property("highscore"), Some(Value::Int(40)));
    }
}
