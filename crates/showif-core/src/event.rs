#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! The runtime is driven by discrete events. Interactive front-ends turn raw
//! input into [`Event`]s with [`Event::parse_command`].

/// Identifies a zero-argument command a click can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandId {
    /// Flip the host component's flag.
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A click on the control bound to a command.
    Click(CommandId),
    /// Periodic tick; components may ignore it.
    Tick,
    /// Request to leave the event loop.
    Quit,
}

impl Event {
    /// Map one line of user input to an event.
    ///
    /// Whitespace and case are ignored. An empty line counts as a click on
    /// the toggle button. Returns `None` for anything unrecognized.
    #[must_use]
    pub fn parse_command(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "t" | "toggle" | "click" => Some(Self::Click(CommandId::Toggle)),
            "q" | "quit" | "exit" => Some(Self::Quit),
            "tick" => Some(Self::Tick),
            _ => None,
        }
    }
}
