//! Camera state and the pointer interaction state machine for the map view.
//!
//! The camera is a 2D translation and uniform zoom of the logical canvas
//! inside the host viewport, plus a pseudo-3D tilt (rotation about X) and
//! spin (rotation about Z). All angles are in degrees.
//!
//! # Interaction
//!
//! | Input | Effect |
//! |-------|--------|
//! | Primary drag | Pan, in viewport pixels, independent of zoom |
//! | Auxiliary (middle) drag | Rotate: tilt follows vertical travel, spin horizontal |
//! | Wheel | Zoom, pan unchanged (not anchored to the cursor) |
//! | Sector click | Toggle focus on that sector |
//! | Reset | Clear focus and restore the startup camera |
//!
//! While a sector is focused the camera is locked: drag, rotate and zoom
//! input is ignored until focus is cleared.
//!
//! ```
//! use lifemap_logic::config::CameraConfig;
//! use lifemap_logic::viewport::{PointerButton, ViewportController};
//!
//! let mut vp = ViewportController::new(CameraConfig::default(), 1200.0, 800.0);
//! let start = vp.camera();
//! vp.begin_interaction(PointerButton::Primary, (100.0, 100.0));
//! vp.update_interaction((130.0, 85.0));
//! vp.end_interaction();
//! assert_eq!(vp.camera().pan_x, start.pan_x + 30.0);
//! assert_eq!(vp.camera().pan_y, start.pan_y - 15.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{validate_camera_config, CameraConfig};
use crate::constants::{MAP_HEIGHT, MAP_WIDTH};
use crate::layout::Sector;

/// Pan, zoom and rotation applied to the whole canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub pan_x: f32,
    pub pan_y: f32,
    pub scale: f32,
    /// Rotation about the X axis, degrees.
    pub tilt_x: f32,
    /// Rotation about the Z axis, degrees.
    pub spin_z: f32,
}

impl CameraState {
    /// Rotation `(z, x)` to apply to labels so they face the viewer.
    pub fn label_counter_rotation(&self) -> (f32, f32) {
        (-self.spin_z, -self.tilt_x)
    }
}

/// Compute the startup camera: canvas centred in the viewport at the
/// default scale and rotation.
pub fn frame_defaults(viewport_width: f32, viewport_height: f32, config: &CameraConfig) -> CameraState {
    CameraState {
        pan_x: (viewport_width - MAP_WIDTH) / 2.0,
        pan_y: (viewport_height - MAP_HEIGHT) / 2.0,
        scale: config.default_scale,
        tilt_x: config.default_tilt,
        spin_z: config.default_spin,
    }
}

/// Camera that centres a sector anchor at the focus scale, flattened.
pub fn frame_sector(
    viewport_width: f32,
    viewport_height: f32,
    sector: &Sector,
    config: &CameraConfig,
) -> CameraState {
    CameraState {
        pan_x: viewport_width / 2.0 - sector.anchor_x * config.focus_scale,
        pan_y: viewport_height / 2.0 - sector.anchor_y * config.focus_scale,
        scale: config.focus_scale,
        tilt_x: config.focus_tilt,
        spin_z: config.focus_spin,
    }
}

/// Pointer button that started a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    /// Middle button.
    Auxiliary,
    Secondary,
}

/// Which gesture, if any, is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    None,
    Panning,
    Rotating,
}

/// What a pointer-down asks of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerResponse {
    /// Host must suppress the platform default (middle-click autoscroll).
    pub prevent_default: bool,
    pub mode: InteractionMode,
}

/// Result of a focus toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusChange {
    Focused(String),
    Cleared,
}

/// Owns the camera and derives it from pointer input.
#[derive(Debug, Clone)]
pub struct ViewportController {
    config: CameraConfig,
    viewport_width: f32,
    viewport_height: f32,
    camera: CameraState,
    focus: Option<String>,
    /// Free camera captured on entering focus, restored on leaving it.
    pre_focus: Option<CameraState>,
    mode: InteractionMode,
    last_pointer: (f32, f32),
}

impl ViewportController {
    /// Create a controller for a measured viewport, framed at the defaults.
    ///
    /// Limits that fail [`validate_camera_config`] are replaced by
    /// [`CameraConfig::default`] so clamping can never see an inverted range.
    pub fn new(config: CameraConfig, viewport_width: f32, viewport_height: f32) -> Self {
        let errors = validate_camera_config(&config);
        let config = if errors.is_empty() {
            config
        } else {
            log::warn!("camera config rejected, using defaults: {:?}", errors);
            CameraConfig::default()
        };
        let camera = frame_defaults(viewport_width, viewport_height, &config);
        Self {
            config,
            viewport_width,
            viewport_height,
            camera,
            focus: None,
            pre_focus: None,
            mode: InteractionMode::None,
            last_pointer: (0.0, 0.0),
        }
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    /// Hosts skip transition smoothing while a gesture is live.
    pub fn is_interacting(&self) -> bool {
        self.mode != InteractionMode::None
    }

    /// Record a new host size. The camera itself is left where it is.
    ///
    /// The new size takes effect on the next [`reset_view`](Self::reset_view)
    /// or focus; hosts wanting a recentre on resize call `reset_view` after.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Pointer down. Ignored while a sector is focused.
    pub fn begin_interaction(&mut self, button: PointerButton, pos: (f32, f32)) -> PointerResponse {
        if !(pos.0.is_finite() && pos.1.is_finite()) {
            return PointerResponse {
                prevent_default: false,
                mode: self.mode,
            };
        }
        if let Some(focus) = &self.focus {
            log::debug!("pointer down ignored, focused on {}", focus);
            return PointerResponse {
                prevent_default: false,
                mode: self.mode,
            };
        }

        let prevent_default = match button {
            PointerButton::Primary => {
                self.mode = InteractionMode::Panning;
                false
            }
            PointerButton::Auxiliary => {
                self.mode = InteractionMode::Rotating;
                true
            }
            PointerButton::Secondary => false,
        };
        self.last_pointer = pos;

        PointerResponse {
            prevent_default,
            mode: self.mode,
        }
    }

    /// Pointer move. Applies the delta since the last observed position.
    pub fn update_interaction(&mut self, pos: (f32, f32)) {
        if !(pos.0.is_finite() && pos.1.is_finite()) {
            return;
        }
        let dx = pos.0 - self.last_pointer.0;
        let dy = pos.1 - self.last_pointer.1;

        match self.mode {
            InteractionMode::None => {}
            InteractionMode::Panning => {
                self.camera.pan_x += dx;
                self.camera.pan_y += dy;
            }
            InteractionMode::Rotating => {
                let sensitivity = self.config.rotate_sensitivity;
                self.camera.tilt_x = self.config.clamp_tilt(self.camera.tilt_x - dy * sensitivity);
                self.camera.spin_z = self.config.clamp_spin(self.camera.spin_z + dx * sensitivity);
            }
        }

        self.last_pointer = pos;
    }

    /// Pointer up.
    pub fn end_interaction(&mut self) {
        self.mode = InteractionMode::None;
    }

    /// Pointer left the viewport; ends any gesture.
    pub fn pointer_leave(&mut self) {
        self.end_interaction();
    }

    /// Wheel. Positive deltas (scrolling down) zoom out.
    pub fn zoom(&mut self, wheel_delta: f32) {
        if self.focus.is_some() {
            log::debug!("zoom ignored while focused");
            return;
        }
        if !wheel_delta.is_finite() {
            return;
        }
        self.camera.scale = self
            .config
            .clamp_scale(self.camera.scale - wheel_delta * self.config.zoom_factor);
    }

    /// Toggle focus on a sector.
    ///
    /// Focusing the already-focused sector clears focus and restores the
    /// free camera that was live before focus was entered. Switching
    /// directly between sectors keeps that original free camera.
    pub fn focus_sector(&mut self, sector: &Sector) -> FocusChange {
        if self.focus.as_deref() == Some(sector.id.as_str()) {
            self.clear_focus();
            return FocusChange::Cleared;
        }

        if self.focus.is_none() {
            self.pre_focus = Some(self.camera);
        }
        self.mode = InteractionMode::None;
        self.focus = Some(sector.id.clone());
        self.camera = frame_sector(self.viewport_width, self.viewport_height, sector, &self.config);
        FocusChange::Focused(sector.id.clone())
    }

    /// Leave focus mode, restoring the pre-focus camera. No-op when unfocused.
    pub fn clear_focus(&mut self) {
        if self.focus.take().is_some() {
            if let Some(camera) = self.pre_focus.take() {
                self.camera = camera;
            }
        }
    }

    /// Clear focus and return to the startup camera for the current size.
    pub fn reset_view(&mut self) {
        self.focus = None;
        self.pre_focus = None;
        self.mode = InteractionMode::None;
        self.camera = frame_defaults(self.viewport_width, self.viewport_height, &self.config);
        log::debug!("view reset for {}x{}", self.viewport_width, self.viewport_height);
    }
}
