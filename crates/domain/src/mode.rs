//! Global mode switches.

/// The two remotely writable mode switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Suppresses the automatic controller when `true`.
    Manual,
    /// Forces every actuator off when `false`.
    SystemEnabled,
}

impl Mode {
    pub const ALL: [Self; 2] = [Self::Manual, Self::SystemEnabled];

    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Manual => "modo_manual",
            Self::SystemEnabled => "liga_geral",
        }
    }
}

/// Current value of both mode switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFlags {
    pub manual_mode: bool,
    pub system_enabled: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            manual_mode: false,
            system_enabled: true,
        }
    }
}

impl ModeFlags {
    /// The automatic controller runs only in automatic mode on an enabled
    /// system.
    #[must_use]
    pub fn automatic_control_active(self) -> bool {
        !self.manual_mode && self.system_enabled
    }

    #[must_use]
    pub fn get(self, mode: Mode) -> bool {
        match mode {
            Mode::Manual => self.manual_mode,
            Mode::SystemEnabled => self.system_enabled,
        }
    }

    pub fn set(&mut self, mode: Mode, value: bool) {
        match mode {
            Mode::Manual => self.manual_mode = value,
            Mode::SystemEnabled => self.system_enabled = value,
        }
    }
}
