/// The operating systems version documents know about.
///
/// Anything else (BSDs, etc.) has no entry here, and code
/// taking an `Option<Platform>` treats `None` as "matches
/// no OS-specific rule or native".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub fn current() -> Option<Self> {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Maps a Rust `target_os` style name
    /// (see [`std::env::consts::OS`]) to a platform.
    #[must_use]
    pub fn from_os_name(name: &str) -> Option<Self> {
        match name {
            "windows" => Some(Self::Windows),
            "macos" => Some(Self::MacOs),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }

    /// Name used in library `rules[].os.name`
    /// and as the key of the `natives` map.
    #[must_use]
    pub fn rule_name(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "osx",
            Self::Linux => "linux",
        }
    }

    /// Whether an OS name from a version document refers to this platform.
    #[must_use]
    pub fn matches_os_name(self, name: &str) -> bool {
        name == self.rule_name() || (self == Self::MacOs && name == "macos")
    }

    /// The classifier holding this platform's native libraries,
    /// used when a library has no `natives` map of its own.
    #[must_use]
    pub fn native_classifier(self) -> &'static str {
        match self {
            Self::Windows => "natives-windows",
            Self::MacOs => "natives-osx",
            Self::Linux => "natives-linux",
        }
    }
}
