#![forbid(unsafe_code)]

//! Demo application: an access gate rendered on a text screen.
//!
//! Each frame prints the toggle button followed by whatever the screen
//! currently shows.

use std::io::{BufRead, Write};

use showif_core::{CommandId, Event};
use showif_runtime::{AccessGate, EventOutcome, GateConfig, Screen, SlotSurface};
use tracing::{debug, warn};

use crate::error::Result;

const BUTTON: &str = "[ Toggle access ]";
const PROMPT: &str = "(enter/t = toggle, q = quit)";

pub struct App {
    screen: Screen,
    gate: AccessGate<SlotSurface>,
    frames: u64,
}

impl App {
    #[must_use]
    pub fn new(config: GateConfig) -> Self {
        let screen = Screen::new();
        let granted = screen.add_slot();
        let denied = screen.add_slot();
        let gate = AccessGate::new(config, granted, denied);
        Self {
            screen,
            gate,
            frames: 0,
        }
    }

    #[must_use]
    pub fn gate(&self) -> &AccessGate<SlotSurface> {
        &self.gate
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Write one frame: button, screen lines, blank separator.
    pub fn draw<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.frames += 1;
        writeln!(out, "{BUTTON}")?;
        self.screen.render_to(out)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    /// Draw, then click the button `clicks` times, drawing after each.
    pub fn run_scripted<W: Write>(&mut self, clicks: u32, out: &mut W) -> Result<()> {
        self.draw(out)?;
        let click = Event::Click(CommandId::Toggle);
        for _ in 0..clicks {
            self.gate.on_event(&click);
            self.draw(out)?;
        }
        debug!(frames = self.frames, "scripted run complete");
        Ok(())
    }

    /// Read commands line by line until `q` or end of input.
    pub fn run_interactive<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "{PROMPT}")?;
        self.draw(out)?;
        for line in input.lines() {
            let line = line?;
            let Some(event) = Event::parse_command(&line) else {
                warn!(input = %line.trim(), "unrecognized command");
                writeln!(out, "unknown command: {}", line.trim())?;
                continue;
            };
            match self.gate.on_event(&event) {
                EventOutcome::Handled(_) => self.draw(out)?,
                EventOutcome::Ignored => {}
                EventOutcome::Quit => break,
            }
        }
        debug!(frames = self.frames, "interactive run complete");
        Ok(())
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
