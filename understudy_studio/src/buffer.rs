// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Buffered registrations and the script they serialize to.

use std::fmt;

use kurbo::Size;
use understudy_player::Statement;

/// Lines that construct a player with the recommended options, placed before the
/// registrations.
pub const BOOTSTRAP: &[&str] = &[
    "const { createVirtualMousePlayer } = await import('https://esm.sh/@zouloux/virtual-mouse')",
    "const mouse = createVirtualMousePlayer({",
    "\thideScrollbar: true,",
    "\thideCursor: true,",
    "\tpreventMouseWheel: true,",
    "})",
    "await mouse.initHoversHack()",
    "mouse.initReactEvents( document.body.firstChild )",
];

/// Registrations recorded so far, one group of statements per click or scroll correction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReplayBuffer {
    groups: Vec<Vec<Statement>>,
}

impl ReplayBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one registration.
    pub fn push(&mut self, group: impl IntoIterator<Item = Statement>) {
        self.groups.push(group.into_iter().collect());
    }

    /// Every registration, oldest first.
    pub fn groups(&self) -> &[Vec<Statement>] {
        &self.groups
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every statement in order.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.groups.iter().flatten()
    }

    /// The full script: metadata comments, [`BOOTSTRAP`], a blank line, then each registration
    /// followed by a blank line.
    pub fn script(&self, url: &str, viewport: Size) -> String {
        let mut lines = vec![
            format!("// Url: {url}"),
            format!("// Viewport: {}x{}", viewport.width, viewport.height),
        ];
        lines.extend(BOOTSTRAP.iter().map(|l| (*l).to_owned()));
        lines.push(String::new());
        lines.push(self.to_string());
        lines.join("\n")
    }
}

impl fmt::Display for ReplayBuffer {
    /// Registrations only, each line terminated and each group followed by a blank line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            for statement in group {
                writeln!(f, "{statement}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
