// Copyright (c) 2024-2025 Jesse Morgan / Morgan Forge
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Terminal frontend.
//!
//! Paints the button as a single line that is rewritten in place, prints
//! toasts as `[i]` lines and notifications as small boxes.
//!
//! ```text
//! [██████░░░░░░░░░░░░░░] ◔ We are loading
//! [i] Download Completed
//! +- Downloads ---------------------------------------------+
//! | The Glide file is downloaded successfully               |
//! | Glide - Image Loading Library by BumpTech (Status: ...) |
//! | > Check the status                                      |
//! +---------------------------------------------------------+
//! ```

use std::io::{self, IsTerminal, Stdout, Write};

use colored::Colorize;
use crossterm::{cursor, queue, terminal};
use unicode_width::UnicodeWidthStr;

use crate::button::{ButtonState, Frame, IdleLook, RenderSurface};
use crate::notify::{DetailView, MessageSink, NotificationChannel, NotificationPayload, NotificationSurface};

/// Minimum inner width of a notification box.
const MIN_BOX_WIDTH: usize = 40;

/// Lay out a notification box. Every row has the same display width.
pub fn notification_box(channel_name: &str, payload: &NotificationPayload) -> Vec<String> {
    let action = format!("> {}", payload.action.label);
    let rows = [payload.title.as_str(), payload.body.as_str(), action.as_str()];

    let header = format!("+- {} ", channel_name);
    let header_width = UnicodeWidthStr::width(header.as_str());
    // A long channel name widens the box instead of overflowing the header
    let width = rows
        .iter()
        .map(|row| UnicodeWidthStr::width(*row))
        .max()
        .unwrap_or(0)
        .max(MIN_BOX_WIDTH)
        .max(header_width.saturating_sub(2));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("{}{}+", header, "-".repeat(width + 3 - header_width)));
    for row in rows {
        let pad = width - UnicodeWidthStr::width(row);
        lines.push(format!("| {}{} |", row, " ".repeat(pad)));
    }
    lines.push(format!("+{}+", "-".repeat(width + 2)));
    lines
}

pub struct TerminalFrontend<W: Write = Stdout> {
    out: W,
    /// Rewrite the button line in place (output is a TTY)
    in_place: bool,
    /// The button line is on screen without a trailing newline
    line_open: bool,
    last_state: Option<ButtonState>,
    channels: Vec<NotificationChannel>,
    last_notification: Option<NotificationPayload>,
}

impl TerminalFrontend {
    pub fn new() -> Self {
        let out = io::stdout();
        let in_place = out.is_terminal();
        Self::with_writer(out, in_place)
    }
}

impl Default for TerminalFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalFrontend<W> {
    /// Frontend over any writer. `in_place` redraws the button line with
    /// cursor movement; otherwise one line is printed per state change.
    pub fn with_writer(out: W, in_place: bool) -> Self {
        Self {
            out,
            in_place,
            line_open: false,
            last_state: None,
            channels: Vec::new(),
            last_notification: None,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// The most recently posted notification.
    pub fn last_notification(&self) -> Option<&NotificationPayload> {
        self.last_notification.as_ref()
    }

    /// Print a details view (what the notification action opens).
    pub fn show_details(&mut self, details: &DetailView) {
        self.close_line();
        let mut text = format!("{}\n", "Download details".bold());
        for line in details.lines() {
            text.push_str(&format!("  {}\n", line));
        }
        self.write_raw(&text);
    }

    /// Finish the button line so the next output starts on a fresh row.
    pub fn close_line(&mut self) {
        if self.line_open {
            self.write_raw("\n");
            self.line_open = false;
        }
    }

    fn write_raw(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::debug!(error = %e, "terminal write failed");
        }
    }

    fn paint(&mut self, frame: &Frame) -> io::Result<()> {
        let line = frame.to_line();
        let styled = match frame.state {
            ButtonState::Loading => line.cyan(),
            ButtonState::Idle(IdleLook::Completed) => line.green(),
            ButtonState::Idle(IdleLook::Ready) => line.normal(),
        };
        if self.line_open {
            queue!(
                self.out,
                cursor::MoveToColumn(0),
                terminal::Clear(terminal::ClearType::CurrentLine)
            )?;
        }
        write!(self.out, "{}", styled)?;
        self.out.flush()
    }
}

impl<W: Write> RenderSurface for TerminalFrontend<W> {
    fn draw(&mut self, frame: &Frame) {
        let state_changed = self.last_state != Some(frame.state);
        self.last_state = Some(frame.state);

        if self.in_place {
            if let Err(e) = self.paint(frame) {
                tracing::debug!(error = %e, "button redraw failed");
            }
            self.line_open = true;
        } else if state_changed {
            // Piped output: one line per state, not per tick
            self.write_raw(&format!("{}\n", frame.to_line()));
        }
    }
}

impl<W: Write> MessageSink for TerminalFrontend<W> {
    fn show_message(&mut self, message: &str) {
        self.close_line();
        self.write_raw(&format!("{} {}\n", "[i]".yellow(), message));
    }
}

impl<W: Write> NotificationSurface for TerminalFrontend<W> {
    fn ensure_channel(&mut self, channel: &NotificationChannel) {
        if self.channels.iter().any(|c| c.id == channel.id) {
            return;
        }
        tracing::debug!(channel = %channel.id, "notification channel created");
        self.channels.push(channel.clone());
    }

    fn post(&mut self, payload: NotificationPayload) {
        let channel_name = self
            .channels
            .iter()
            .find(|c| c.id == payload.channel_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| payload.channel_id.clone());

        let mut text = notification_box(&channel_name, &payload).join("\n");
        text.push('\n');

        self.close_line();
        self.write_raw(&text.bright_cyan().to_string());
        self.last_notification = Some(payload);
    }
}
