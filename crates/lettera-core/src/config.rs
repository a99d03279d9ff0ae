/// Configuration for a Lettera engine instance
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub profiling: ProfilingMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling scopes are compiled in but not recorded
    #[default]
    Off,
    /// Scopes are recorded and frames are marked every update cycle
    On,
    /// Like [`ProfilingMode::On`], and data is also served to `puffin_viewer`
    /// over HTTP (requires the `profiling` feature)
    WithWebserver,
}

impl ProfilingMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ProfilingMode::Off)
    }
}
