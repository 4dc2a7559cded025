//! Line-oriented key commands read from stdin.

/// A command typed at the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `s` — finish the current story early.
    Skip,
    /// `r` — go back one story.
    Reverse,
    /// `p` — hold: freeze the current story.
    Pause,
    /// `c` — release: continue the current story.
    Resume,
    /// `a` — put the row aside, keeping the position.
    Abandon,
    /// `g` — pick up again where the row was put aside.
    Restart,
    /// `q` — tear down and exit.
    Quit,
}

impl Key {
    /// Parses one input line; surrounding whitespace and case are ignored.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "s" | "skip" => Some(Self::Skip),
            "r" | "reverse" => Some(Self::Reverse),
            "p" | "pause" => Some(Self::Pause),
            "c" | "resume" => Some(Self::Resume),
            "a" | "abandon" => Some(Self::Abandon),
            "g" | "go" => Some(Self::Restart),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}
