//! Virtual-stick input sampling.
//!
//! A fixed circular control surface anchored near the bottom-left of the
//! window turns pointer drags into a normalised direction + magnitude, and a
//! separate discrete fire control is tracked with press/release edges.
//!
//! ## Pipeline (runs first in every `Update` frame)
//!
//! 1. [`stick_resize_system`] — re-anchors the surface when the window resizes.
//! 2. [`stick_drag_system`] — pointer down/move/up → [`StickState::sample`].
//! 3. [`fire_button_system`] — fire key/button → press/release edges.
//!
//! The sampling maths lives in [`VirtualStick::sample`], a pure function, so
//! the deadzone and clamping behaviour is unit-testable without a window.
//! Downstream systems read only [`StickState`]; tests can populate it
//! directly to drive the character without a real input device.
//!
//! ## Heading convention
//!
//! `angle = atan2(x, y)` — a heading-style convention measured from the
//! surface's +y axis toward +x, not the mathematical `atan2(y, x)` form.
//! It is exactly the angle the movement and fire systems consume as
//! `(sin θ, 0, cos θ)`, so one convention flows from the stick to world
//! space with no conversion, and the two forms are never mixed.

use crate::config::CombatConfig;
use bevy::prelude::*;
use bevy::window::WindowResized;

// ── Sample ────────────────────────────────────────────────────────────────────

/// One normalised reading of the control surface.
///
/// `x`/`y` are the pointer offset normalised by the surface radius, clamped
/// to the unit disc; `magnitude` ∈ [0, 1]; `angle` is the heading in radians
/// (see the module docs for the convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickSample {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub magnitude: f32,
}

impl StickSample {
    /// The exact rest state: all four fields zero.  Deadzone filtering and
    /// release always emit this value, never a noisy near-zero one.
    pub const NEUTRAL: Self = Self {
        x: 0.0,
        y: 0.0,
        angle: 0.0,
        magnitude: 0.0,
    };
}

impl Default for StickSample {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

// ── Control surface ───────────────────────────────────────────────────────────

/// The circular control surface: a screen-space centre and radius.
///
/// Established at startup from the window size and re-anchored on resize.
/// Pointer coordinates are in Bevy's window space (origin top-left, y down);
/// the sampling maths is agnostic to that choice.
#[derive(Resource, Debug, Clone, Copy)]
pub struct VirtualStick {
    pub center: Vec2,
    pub radius: f32,
}

impl Default for VirtualStick {
    fn default() -> Self {
        let config = CombatConfig::default();
        Self {
            center: Vec2::splat(config.stick_margin + config.stick_radius),
            radius: config.stick_radius,
        }
    }
}

impl VirtualStick {
    /// Anchor the surface to the bottom-left corner of a window of the given
    /// logical size.
    pub fn anchored(width: f32, height: f32, config: &CombatConfig) -> Self {
        let inset = config.stick_margin + config.stick_radius;
        Self {
            center: Vec2::new(inset, height - inset),
            radius: config.stick_radius,
        }
    }

    /// Whether a pointer position falls on the control surface (used to
    /// decide if a press begins a drag).
    pub fn contains(&self, pointer: Vec2) -> bool {
        pointer.is_finite() && pointer.distance(self.center) <= self.radius
    }

    /// Convert a pointer position into a normalised [`StickSample`].
    ///
    /// Offsets beyond the radius are clamped along their own angle, so
    /// direction is preserved and magnitude caps at exactly 1.0.  Samples at
    /// or below the deadzone — and any non-finite pointer coordinates —
    /// collapse to [`StickSample::NEUTRAL`].
    pub fn sample(&self, pointer: Vec2, deadzone: f32) -> StickSample {
        if !pointer.is_finite() {
            // Out-of-domain input recovers locally to neutral.
            return StickSample::NEUTRAL;
        }

        let mut offset = pointer - self.center;
        let distance = offset.length();
        let magnitude = (distance / self.radius).min(1.0);

        if magnitude <= deadzone {
            return StickSample::NEUTRAL;
        }

        if distance > self.radius {
            // Clamp to the rim along the same angle.
            offset *= self.radius / distance;
        }

        let x = offset.x / self.radius;
        let y = offset.y / self.radius;

        StickSample {
            x,
            y,
            angle: x.atan2(y),
            magnitude,
        }
    }
}

// ── Per-frame input state ─────────────────────────────────────────────────────

/// The aggregated input state consumed by the character controller.
///
/// Input systems write it every frame; it is transient and never persisted.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct StickState {
    /// Latest stick reading (neutral while not dragging).
    pub sample: StickSample,
    /// Whether a drag is currently captured by the surface.
    pub dragging: bool,
    /// Fire control state, edge-tracked via [`Self::press_fire`] /
    /// [`Self::release_fire`].  No magnitude concept applies.
    pub fire_held: bool,
}

impl StickState {
    /// Whether the stick is deflected past the deadzone.
    #[inline]
    pub fn movement_active(&self) -> bool {
        self.sample.magnitude > 0.0
    }

    /// Release the stick: back to the exact neutral sample.
    pub fn release(&mut self) {
        self.sample = StickSample::NEUTRAL;
        self.dragging = false;
    }

    /// Fire press edge.
    pub fn press_fire(&mut self) {
        self.fire_held = true;
    }

    /// Fire release edge.
    pub fn release_fire(&mut self) {
        self.fire_held = false;
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Startup system: anchor the control surface to the primary window.
///
/// Headless hosts (tests) keep the default placement; the maths does not
/// depend on where the surface sits.
pub fn place_stick_system(
    windows: Query<&Window>,
    config: Res<CombatConfig>,
    mut stick: ResMut<VirtualStick>,
) {
    if let Ok(window) = windows.single() {
        *stick = VirtualStick::anchored(window.width(), window.height(), &config);
    }
}

/// Re-anchor the control surface whenever the window is resized.
pub fn stick_resize_system(
    mut resized: MessageReader<WindowResized>,
    config: Res<CombatConfig>,
    mut stick: ResMut<VirtualStick>,
) {
    if let Some(event) = resized.read().last() {
        *stick = VirtualStick::anchored(event.width, event.height, &config);
    }
}

/// Translate pointer drags over the control surface into stick samples.
///
/// A left-button press (or touch) that lands on the surface captures the
/// drag; subsequent moves re-sample every frame; release snaps back to
/// neutral.  Presses outside the surface are ignored so stray clicks do not
/// nudge the character.
pub fn stick_drag_system(
    windows: Query<&Window>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    stick: Res<VirtualStick>,
    config: Res<CombatConfig>,
    mut state: ResMut<StickState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    // Touch drives the stick with the same capture rules as the mouse.
    let touch_position = touches.iter().map(|touch| touch.position()).next();
    let pointer = window.cursor_position().or(touch_position);
    let pressed = buttons.pressed(MouseButton::Left) || touch_position.is_some();

    if !pressed {
        if state.dragging {
            state.release();
        }
        return;
    }

    let Some(pointer) = pointer else {
        return;
    };

    if !state.dragging {
        if !stick.contains(pointer) {
            return;
        }
        state.dragging = true;
    }

    state.sample = stick.sample(pointer, config.stick_deadzone);
}

/// Map the demo's fire inputs (Space key or right mouse button) onto the
/// fire press/release edges.
pub fn fire_button_system(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut state: ResMut<StickState>,
) {
    let held = keys.pressed(KeyCode::Space) || buttons.pressed(MouseButton::Right);
    if held && !state.fire_held {
        state.press_fire();
    } else if !held && state.fire_held {
        state.release_fire();
    }
}
