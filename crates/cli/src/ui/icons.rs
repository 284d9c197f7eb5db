//! Status markers used in command output

/// Status icon type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Success,
    Warning,
    Error,
    Info,
    Hook,
}

impl StatusIcon {
    /// Plain text marker
    pub fn get(self) -> &'static str {
        match self {
            Self::Success => "[OK]",
            Self::Warning => "[!]",
            Self::Error => "[X]",
            Self::Info => "[i]",
            Self::Hook => "[*]",
        }
    }
}

impl std::fmt::Display for StatusIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.get())
    }
}
