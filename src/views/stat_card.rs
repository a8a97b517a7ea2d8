//! Stat Card Component
//!
//! A single labelled figure with an optional hint line.

use std::fmt;

/// Boxed headline figure
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub hint: Option<String>,
}

impl StatCard {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
            hint: None,
        }
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Rendered lines, all padded to the same width
    pub fn lines(&self) -> Vec<String> {
        let mut body = vec![self.label.clone(), self.value.clone()];
        if let Some(hint) = &self.hint {
            body.push(hint.clone());
        }

        let inner = body.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let border = format!("+{}+", "-".repeat(inner + 2));

        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.push(border.clone());
        for line in body {
            let pad = inner - line.chars().count();
            lines.push(format!("| {}{} |", line, " ".repeat(pad)));
        }
        lines.push(border);
        lines
    }

    pub fn width(&self) -> usize {
        self.lines().first().map(|l| l.chars().count()).unwrap_or(0)
    }
}

impl fmt::Display for StatCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Lay cards out side by side
pub(crate) fn render_row(cards: &[StatCard]) -> String {
    let rendered: Vec<Vec<String>> = cards.iter().map(StatCard::lines).collect();
    let height = rendered.iter().map(Vec::len).max().unwrap_or(0);

    (0..height)
        .map(|row| {
            rendered
                .iter()
                .map(|lines| {
                    let width = lines.first().map(|l| l.chars().count()).unwrap_or(0);
                    match lines.get(row) {
                        Some(line) => line.clone(),
                        None => " ".repeat(width),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
