//=========================================================================
// Controllers
//=========================================================================
//
// Per-tick movement sources.
//
// A controller is a stateful step function: every call to `advance()`
// yields the next `(dx, dy)` or `None` once the sequence is exhausted.
// Controllers never restart on their own; an exhausted controller keeps
// returning `None` and its entity stops moving.
//
// Built-in Controllers:
// - `ConstantController`    straight line at fixed velocity
// - `SinController`         primary-axis speed, sinusoidal sample
// - `SigmoidController`     logistic ease between -amp and amp (delta)
// - `SigmoidPrimeController` bell-shaped bump (delta)
// - `InvertedSigmoidController` logistic ease from 2·amp down to 0 (delta)
// - `KeyboardController`    accumulator driven by key bindings
// - `FiniteController`      caps any controller to N steps
//
//=========================================================================

//=== Submodules ==========================================================

pub mod keyboard;

//=== Public Re-exports ===================================================

pub use keyboard::{AxisHandle, KeyboardController};

//=== External Dependencies ===============================================

use std::f32::consts::PI;

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyBinding, KeyCode, KeyPhase};
use crate::core::scene::{BuildContext, ParamError, Params};

//=== Controller Trait ====================================================

/// A source of per-tick movement.
pub trait Controller {
    /// Produces the next movement step, or `None` when exhausted.
    fn advance(&mut self) -> Option<(f32, f32)>;
}

impl std::fmt::Debug for dyn Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Controller")
    }
}

/// Orders a (primary, perpendicular) pair along the configured axis.
#[inline]
fn oriented(primary: f32, value: f32, vertical: bool) -> (f32, f32) {
    if vertical {
        (value, primary)
    } else {
        (primary, value)
    }
}

/// Logistic curve over `[0, length]`, centred at `length / 2`.
fn sigmoid(x: f32, temperature: f32, length: f32) -> f32 {
    let exponent = -(x * 20.0 / length - 10.0);
    1.0 / ((exponent / temperature).exp() + 1.0)
}

//=== ConstantController ==================================================

/// Moves in a straight line: always yields `(dx * speed, dy * speed)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantController {
    step: (f32, f32),
}

impl ConstantController {
    pub fn new(dx: f32, dy: f32, speed: f32) -> Self {
        Self { step: (dx * speed, dy * speed) }
    }
}

impl Controller for ConstantController {
    fn advance(&mut self) -> Option<(f32, f32)> {
        Some(self.step)
    }
}

//=== SinController =======================================================

/// Moves `speed` along the primary axis while sampling
/// `amp * sin(2π·freq·i / length)` on the perpendicular one.
///
/// The perpendicular value is the raw sample, not the change since the
/// previous step.
#[derive(Debug, Clone, PartialEq)]
pub struct SinController {
    factor: f32,
    amp: f32,
    speed: f32,
    vertical: bool,
    i: f32,
}

impl SinController {
    pub fn new(length: f32, freq: f32, amp: f32, speed: f32, vertical: bool) -> Self {
        Self {
            factor: freq * 2.0 / length * PI,
            amp,
            speed,
            vertical,
            i: 0.0,
        }
    }
}

impl Controller for SinController {
    fn advance(&mut self) -> Option<(f32, f32)> {
        let value = self.amp * (self.factor * self.i).sin();
        self.i += self.speed;
        Some(oriented(self.speed, value, self.vertical))
    }
}

//=== Sigmoid Family ======================================================

/// Shape of a sigmoid-family curve, as a function of σ(x).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigmoidCurve {
    /// `amp · (2σ − 1)`
    Sigmoid,
    /// `amp · 4σ(1 − σ)`
    Prime,
    /// `amp · (1 − (2σ − 1))`
    Inverted,
}

impl SigmoidCurve {
    fn sample(self, s: f32, amp: f32) -> f32 {
        match self {
            Self::Sigmoid => amp * (2.0 * s - 1.0),
            Self::Prime => amp * 4.0 * s * (1.0 - s),
            Self::Inverted => amp * (1.0 - (2.0 * s - 1.0)),
        }
    }
}

/// Shared machinery for the logistic controllers.
///
/// Yields `speed` on the primary axis and the change of the curve since
/// the previous step on the other.
#[derive(Debug, Clone, PartialEq)]
pub struct SigmoidMotion {
    curve: SigmoidCurve,
    length: f32,
    amp: f32,
    temperature: f32,
    speed: f32,
    vertical: bool,
    x: f32,
    last: f32,
}

impl SigmoidMotion {
    pub fn new(curve: SigmoidCurve, length: f32, amp: f32, temperature: f32, speed: f32, vertical: bool) -> Self {
        Self { curve, length, amp, temperature, speed, vertical, x: 0.0, last: 0.0 }
    }
}

impl Controller for SigmoidMotion {
    fn advance(&mut self) -> Option<(f32, f32)> {
        let s = sigmoid(self.x, self.temperature, self.length);
        let next = self.curve.sample(s, self.amp);
        let value = next - self.last;
        self.last = next;
        self.x += self.speed;
        Some(oriented(self.speed, value, self.vertical))
    }
}

/// Logistic ease: accumulated displacement runs from `-amp` to `amp`.
pub struct SigmoidController;

/// Bell-shaped bump peaking at `amp` halfway along `length`.
pub struct SigmoidPrimeController;

/// Logistic ease from `2·amp` down to zero.
pub struct InvertedSigmoidController;

impl SigmoidController {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(length: f32, amp: f32, temperature: f32, speed: f32, vertical: bool) -> SigmoidMotion {
        SigmoidMotion::new(SigmoidCurve::Sigmoid, length, amp, temperature, speed, vertical)
    }
}

impl SigmoidPrimeController {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(length: f32, amp: f32, temperature: f32, speed: f32, vertical: bool) -> SigmoidMotion {
        SigmoidMotion::new(SigmoidCurve::Prime, length, amp, temperature, speed, vertical)
    }
}

impl InvertedSigmoidController {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(length: f32, amp: f32, temperature: f32, speed: f32, vertical: bool) -> SigmoidMotion {
        SigmoidMotion::new(SigmoidCurve::Inverted, length, amp, temperature, speed, vertical)
    }
}

//=== FiniteController ====================================================

/// Forwards another controller for at most `steps` advances.
pub struct FiniteController {
    inner: Box<dyn Controller>,
    remaining: usize,
}

impl FiniteController {
    pub fn new(inner: Box<dyn Controller>, steps: usize) -> Self {
        Self { inner, remaining: steps }
    }
}

impl Controller for FiniteController {
    fn advance(&mut self) -> Option<(f32, f32)> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.inner.advance()
    }
}

//=========================================================================
// Factories
//=========================================================================
//
// Registry entry points. Every factory reads its parameters by name with
// the same defaults the constructors document.
//
//=========================================================================

pub(crate) fn build_constant(params: &mut Params, _ctx: &mut BuildContext<'_>) -> Result<Box<dyn Controller>, ParamError> {
    Ok(Box::new(ConstantController::new(
        params.float("dx")?,
        params.float("dy")?,
        params.float_or("speed", 1.0)?,
    )))
}

pub(crate) fn build_sin(params: &mut Params, _ctx: &mut BuildContext<'_>) -> Result<Box<dyn Controller>, ParamError> {
    let length = params.positive("length")?;
    Ok(Box::new(SinController::new(
        length,
        params.float("freq")?,
        params.float("amp")?,
        params.float_or("speed", 1.0)?,
        params.bool_or("vertical", false)?,
    )))
}

fn build_sigmoid_curve(curve: SigmoidCurve, params: &mut Params) -> Result<Box<dyn Controller>, ParamError> {
    let length = params.positive("length")?;
    let temperature = params.float_or("temperature", 1.0)?;
    if temperature == 0.0 {
        return Err(ParamError::invalid("temperature", "must not be zero"));
    }
    Ok(Box::new(SigmoidMotion::new(
        curve,
        length,
        params.float("amp")?,
        temperature,
        params.float_or("speed", 1.0)?,
        params.bool_or("vertical", false)?,
    )))
}

pub(crate) fn build_sigmoid(params: &mut Params, _ctx: &mut BuildContext<'_>) -> Result<Box<dyn Controller>, ParamError> {
    build_sigmoid_curve(SigmoidCurve::Sigmoid, params)
}

pub(crate) fn build_sigmoid_prime(params: &mut Params, _ctx: &mut BuildContext<'_>) -> Result<Box<dyn Controller>, ParamError> {
    build_sigmoid_curve(SigmoidCurve::Prime, params)
}

pub(crate) fn build_inverted_sigmoid(params: &mut Params, _ctx: &mut BuildContext<'_>) -> Result<Box<dyn Controller>, ParamError> {
    build_sigmoid_curve(SigmoidCurve::Inverted, params)
}

pub(crate) fn build_finite(params: &mut Params, _ctx: &mut BuildContext<'_>) -> Result<Box<dyn Controller>, ParamError> {
    let steps = params.int("steps")?;
    let steps = usize::try_from(steps).map_err(|_| ParamError::invalid("steps", "must not be negative"))?;
    let inner = params
        .take_controller("controller")
        .ok_or_else(|| ParamError::missing("controller"))?;
    Ok(Box::new(FiniteController::new(inner, steps)))
}

/// Binds the four direction keys to a fresh accumulator.
///
/// Key parameters `up`, `down`, `left`, `right` default to the arrows.
pub(crate) fn build_keyboard(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Box<dyn Controller>, ParamError> {
    let axis = AxisHandle::default();
    let directions = [
        ("up", KeyCode::ArrowUp, (0.0, -1.0)),
        ("down", KeyCode::ArrowDown, (0.0, 1.0)),
        ("left", KeyCode::ArrowLeft, (-1.0, 0.0)),
        ("right", KeyCode::ArrowRight, (1.0, 0.0)),
    ];
    for (name, default, delta) in directions {
        let key = params.key_or(name, default)?;
        for phase in [KeyPhase::Down, KeyPhase::Up] {
            ctx.bind_key(key, phase, KeyBinding::Axis { axis: axis.clone(), delta });
        }
    }
    Ok(Box::new(KeyboardController::new(axis)))
}

//=========================================================================
// Unit Tests
//=========================================================================
