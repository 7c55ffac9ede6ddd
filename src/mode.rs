//! Mode authority gate.
//!
//! Every controlled subsystem carries a three-state operating mode which
//! decides who may command its actuator outputs:
//!
//! | mode   | accepted actuator writes              |
//! |--------|---------------------------------------|
//! | OFF    | none (outputs forced to all-off)      |
//! | MANUAL | explicit commands (button or network) |
//! | AUTO   | the automatic algorithm only          |
//!
//! Mode transitions themselves are always external commands (network or
//! local control), never internally triggered. Entry actions run inside
//! the store mutators of each subsystem (see `thermostat` / `room`).

/// Top-level authority state of a subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Off,
    Manual,
    Auto,
}

impl Mode {
    /// Canonical status-topic payload spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Manual => "MANUAL",
            Self::Auto => "AUTO",
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of an actuation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSource {
    /// Local input: button press or potentiometer knob.
    Local,
    /// A validated network command.
    Network,
    /// The automatic control algorithm inside the control task.
    Auto,
}

impl core::fmt::Display for ControlSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Network => f.write_str("network"),
            Self::Auto => f.write_str("auto-algorithm"),
        }
    }
}

/// The write-gating rule applied by every mutator that targets actuator
/// outputs. All other combinations are rejected and logged by the caller,
/// never silently merged.
pub fn write_allowed(source: ControlSource, mode: Mode) -> bool {
    matches!(
        (source, mode),
        (ControlSource::Auto, Mode::Auto)
            | (ControlSource::Local, Mode::Manual)
            | (ControlSource::Network, Mode::Manual)
    )
}
