//! Event-driven coordinator for one map session.
//!
//! [`MapSession`] owns every piece of mutable state (camera, fog, activity
//! log, selection, view mode) and applies host input events to it in
//! arrival order. It is strictly single-threaded: each event is applied to
//! completion before the next. A renderer reads [`MapSession::snapshot`]
//! (or the individual accessors) after any event and redraws from scratch.
//!
//! Events that break an input contract, such as an id that is not in the
//! catalog, are logged and rejected without touching state, so a bad event
//! can never strand the camera or fog.
//!
//! ```
//! use lifemap_logic::config::MapConfig;
//! use lifemap_logic::session::{InputEvent, MapSession};
//!
//! let config = MapConfig { seed: Some(7), ..MapConfig::default() };
//! let mut session = MapSession::new(config, 1280.0, 720.0);
//! session.handle(InputEvent::SelectNode { node_id: "vitals-0".into() });
//! let before = session.fog().level("vitals-0").unwrap();
//! session.handle(InputEvent::SubmitLog { text: "slept 8h".into() });
//! assert_eq!(session.fog().level("vitals-0").unwrap(), before.saturating_sub(15));
//! assert_eq!(session.log().len(), 1);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::activity::{ActivityLog, LogContext, LogEntry};
use crate::config::{validate_config, MapConfig};
use crate::error::LifeMapError;
use crate::fog::FogModel;
use crate::layout::{generate_layout, MapLayout, MapNode};
use crate::presentation::{present_node, NodePresentation};
use crate::viewport::{
    CameraState, FocusChange, InteractionMode, PointerButton, ViewportController,
};

/// Top-level page shown by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Map,
    Inbox,
}

/// Input forwarded by the host, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { button: PointerButton, x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    PointerLeave,
    Wheel { delta_y: f32 },
    /// Toggle focus on a sector.
    ClickSector { sector_id: String },
    ExitFocus,
    ClickReset,
    SelectNode { node_id: String },
    CloseDrawer,
    /// Slider on the selected node.
    SetFog { value: i32 },
    SubmitLog { text: String },
    AdjustAllFog { delta: i32 },
    /// Developer control: every level up by the configured step.
    RaiseFog,
    /// Developer control: every level down by the configured step.
    LowerFog,
    RandomizeFog,
    SwitchView { mode: ViewMode },
    Resize { width: f32, height: f32 },
}

/// What the host must do after an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Suppress the platform default for the triggering event.
    pub prevent_default: bool,
    /// Set when the event broke an input contract and was ignored.
    pub rejected: Option<LifeMapError>,
}

/// Read-only state handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub camera: CameraState,
    pub focus: Option<String>,
    pub interaction: InteractionMode,
    pub fog: BTreeMap<String, u8>,
    pub selected: Option<String>,
    pub view_mode: ViewMode,
    pub log_count: usize,
}

pub struct MapSession {
    config: MapConfig,
    layout: MapLayout,
    fog: FogModel,
    viewport: ViewportController,
    log: ActivityLog,
    selected: Option<String>,
    view_mode: ViewMode,
    rng: StdRng,
}

fn checked(config: MapConfig) -> MapConfig {
    let errors = validate_config(&config);
    if errors.is_empty() {
        return config;
    }
    log::warn!("map config rejected, using defaults: {:?}", errors);
    MapConfig {
        seed: config.seed,
        ..MapConfig::default()
    }
}

impl MapSession {
    /// Generate the layout, seed fog, and frame the camera for a measured viewport.
    ///
    /// A config failing [`validate_config`] is replaced by the defaults,
    /// keeping only its seed.
    pub fn new(config: MapConfig, viewport_width: f32, viewport_height: f32) -> Self {
        let config = checked(config);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let layout = generate_layout(&mut rng);
        let fog = FogModel::initialize(layout.node_ids(), &config.fog, &mut rng);
        log::info!(
            "session started: {} sectors, {} nodes, mean fog {:.1}",
            layout.sectors.len(),
            layout.nodes.len(),
            fog.average()
        );
        Self::from_parts(config, layout, fog, rng, viewport_width, viewport_height)
    }

    /// Assemble a session from prepared state, for hosts and tests that
    /// need exact fog levels.
    pub fn from_parts(
        config: MapConfig,
        layout: MapLayout,
        fog: FogModel,
        rng: StdRng,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Self {
        let config = checked(config);
        let viewport =
            ViewportController::new(config.camera.clone(), viewport_width, viewport_height);
        Self {
            config,
            layout,
            fog,
            viewport,
            log: ActivityLog::new(),
            selected: None,
            view_mode: ViewMode::Map,
            rng,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    pub fn fog(&self) -> &FogModel {
        &self.fog
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn selected_node(&self) -> Option<&MapNode> {
        self.selected.as_deref().and_then(|id| self.layout.node(id))
    }

    /// Node that a submitted log would be linked to: the selection, on the map only.
    pub fn active_node(&self) -> Option<&MapNode> {
        match self.view_mode {
            ViewMode::Map => self.selected_node(),
            ViewMode::Inbox => None,
        }
    }

    /// Apply one event. Rejected events are logged and leave state unchanged.
    pub fn handle(&mut self, event: InputEvent) -> EventOutcome {
        match self.apply(event) {
            Ok(prevent_default) => EventOutcome {
                prevent_default,
                rejected: None,
            },
            Err(err) => {
                log::warn!("event rejected: {}", err);
                EventOutcome {
                    prevent_default: false,
                    rejected: Some(err),
                }
            }
        }
    }

    fn apply(&mut self, event: InputEvent) -> Result<bool, LifeMapError> {
        match event {
            InputEvent::PointerDown { button, x, y } => {
                return Ok(self.viewport.begin_interaction(button, (x, y)).prevent_default);
            }
            InputEvent::PointerMove { x, y } => self.viewport.update_interaction((x, y)),
            InputEvent::PointerUp => self.viewport.end_interaction(),
            InputEvent::PointerLeave => self.viewport.pointer_leave(),
            InputEvent::Wheel { delta_y } => self.viewport.zoom(delta_y),
            InputEvent::ClickSector { sector_id } => {
                self.focus_sector(&sector_id)?;
            }
            InputEvent::ExitFocus => self.viewport.clear_focus(),
            InputEvent::ClickReset => self.viewport.reset_view(),
            InputEvent::SelectNode { node_id } => self.select_node(&node_id)?,
            InputEvent::CloseDrawer => self.selected = None,
            InputEvent::SetFog { value } => {
                self.set_selected_fog(value)?;
            }
            InputEvent::SubmitLog { text } => {
                self.submit_log(&text)?;
            }
            InputEvent::AdjustAllFog { delta } => self.fog.adjust_all(delta),
            InputEvent::RaiseFog => self.fog.adjust_all(self.config.fog.dev_step),
            InputEvent::LowerFog => self.fog.adjust_all(-self.config.fog.dev_step),
            InputEvent::RandomizeFog => self.fog.randomize_all(&mut self.rng),
            InputEvent::SwitchView { mode } => self.view_mode = mode,
            InputEvent::Resize { width, height } => self.viewport.set_viewport_size(width, height),
        }
        Ok(false)
    }

    /// Toggle focus on a sector by id.
    pub fn focus_sector(&mut self, sector_id: &str) -> Result<FocusChange, LifeMapError> {
        let sector = self
            .layout
            .sector(sector_id)
            .ok_or_else(|| LifeMapError::UnknownSector(sector_id.to_string()))?;
        let change = self.viewport.focus_sector(sector);
        log::debug!("focus {:?}", change);
        Ok(change)
    }

    pub fn select_node(&mut self, node_id: &str) -> Result<(), LifeMapError> {
        if self.layout.node(node_id).is_none() {
            return Err(LifeMapError::UnknownNode(node_id.to_string()));
        }
        self.selected = Some(node_id.to_string());
        Ok(())
    }

    /// Set the selected node's fog from its slider.
    pub fn set_selected_fog(&mut self, value: i32) -> Result<u8, LifeMapError> {
        let node_id = self.selected.as_deref().ok_or(LifeMapError::NoSelection)?;
        self.fog.set_level(node_id, value)
    }

    /// Record a log entry now. See [`MapSession::submit_log_at`].
    pub fn submit_log(&mut self, text: &str) -> Result<&LogEntry, LifeMapError> {
        self.submit_log_at(text, Utc::now())
    }

    /// Record a log entry, linking it to the active node and relieving
    /// that node's fog.
    pub fn submit_log_at(
        &mut self,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<&LogEntry, LifeMapError> {
        let context = self
            .active_node()
            .map(|node| LogContext::for_node(node, self.layout.sector_of(node)));
        let relieved = context.as_ref().map(|c| c.node_id.clone());

        let entry = self.log.record(text, context, timestamp)?;

        if let Some(node_id) = relieved {
            match self.fog.relieve(&node_id, self.config.fog.relief_amount) {
                Ok(level) => log::debug!("logged against {}, fog now {}", node_id, level),
                Err(err) => log::warn!("fog relief skipped: {}", err),
            }
        }
        Ok(entry)
    }

    /// Presentation for every node, in layout order.
    pub fn presentations(&self) -> Vec<NodePresentation> {
        let focus = self.viewport.focus();
        self.layout
            .nodes
            .iter()
            .map(|node| {
                let level = self.fog.level(&node.id).unwrap_or(0);
                let selected = self.selected.as_deref() == Some(node.id.as_str());
                present_node(node, level, selected, focus, &self.config.fog)
            })
            .collect()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            camera: self.viewport.camera(),
            focus: self.viewport.focus().map(str::to_string),
            interaction: self.viewport.mode(),
            fog: self
                .fog
                .iter()
                .map(|(id, level)| (id.to_string(), level))
                .collect(),
            selected: self.selected.clone(),
            view_mode: self.view_mode,
            log_count: self.log.len(),
        }
    }
}
