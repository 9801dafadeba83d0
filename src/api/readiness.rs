//! Readiness gate: the surface and the data source become ready on
//! independent, unordered asynchronous events; the first full render must
//! happen exactly once, after both.

/// Explicit gate state. Modeling the two readiness preconditions as an enum
/// (rather than two booleans) makes the exactly-once render transition a
/// single match arm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Unready,
    SurfaceOnly,
    DataOnly,
    Rendered,
}

/// What a marker transition asks the caller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum GateFire {
    /// Keep waiting; the other precondition has not been met (or the initial
    /// render already happened).
    Pending,
    /// Both preconditions now hold for the first time: perform the one-shot
    /// full render.
    RenderAll,
}

#[derive(Debug, Default)]
pub struct ReadinessGate {
    state: GateState,
}

impl ReadinessGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Whether the one-shot full render has already fired. Individual chart
    /// add/update/remove operations bypass the gate once this is true.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.state == GateState::Rendered
    }

    pub fn mark_surface_ready(&mut self) -> GateFire {
        match self.state {
            GateState::Unready => {
                self.state = GateState::SurfaceOnly;
                GateFire::Pending
            }
            GateState::DataOnly => {
                self.state = GateState::Rendered;
                GateFire::RenderAll
            }
            GateState::SurfaceOnly | GateState::Rendered => GateFire::Pending,
        }
    }

    pub fn mark_data_ready(&mut self) -> GateFire {
        match self.state {
            GateState::Unready => {
                self.state = GateState::DataOnly;
                GateFire::Pending
            }
            GateState::SurfaceOnly => {
                self.state = GateState::Rendered;
                GateFire::RenderAll
            }
            GateState::DataOnly | GateState::Rendered => GateFire::Pending,
        }
    }
}
