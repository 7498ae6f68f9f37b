use serde::Serialize;

use crate::effect::EffectKind;
use crate::error::EffectResult;
use crate::lifecycle::Phase;
use crate::squares::{GridOffset, HoveredCell};

/// Read-only snapshot of a mounted effect, handed to diagnostic tooling
/// through the effect's handle.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub kind: Option<EffectKind>,
    pub phase: Phase,
    pub width: f64,
    pub height: f64,
    pub columns: usize,
    pub rows: usize,
    pub cells: usize,
    pub frames_drawn: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transitioning: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<GridOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovered: Option<HoveredCell>,
}

impl Diagnostics {
    pub fn to_json(&self) -> EffectResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
