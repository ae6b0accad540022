//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Applied: green  (applied steps, completed actions)
//!   - Warning/Skipped: yellow (steps that were not applied)
//!   - Error:           red    (validation problems)
//!   - Info/Reference:  cyan   (operation and node ids)
//!   - Accent:          magenta (operation kinds, groups)
//!   - Muted:           dimmed (field labels, reasons)

use crate::operations::OperationKind;
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Colorize an identifier (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Colorize an operation kind, padded to a fixed width.
pub(crate) fn colorize_kind(kind: OperationKind, config: &OutputConfig) -> String {
    let text = format!("{kind:<9}");
    if !config.use_colors {
        return text;
    }
    match kind {
        OperationKind::Source => text.blue().to_string(),
        OperationKind::Add => text.green().to_string(),
        OperationKind::Transform => text.magenta().to_string(),
        OperationKind::Filter => text.cyan().to_string(),
        OperationKind::Remove => text.red().to_string(),
    }
}

/// Icon for an applied or skipped pipeline step.
pub(crate) fn step_icon(applied: bool, config: &OutputConfig) -> String {
    let icon = if applied { "✓" } else { "-" };
    if !config.use_colors {
        return icon.to_string();
    }
    if applied {
        icon.green().to_string()
    } else {
        icon.yellow().to_string()
    }
}

/// Muted text for labels and secondary information.
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Bold text for headers.
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_colors_returns_plain_text() {
        let config = OutputConfig { use_colors: false };
        assert_eq!(success("ok", &config), "ok");
        assert_eq!(error("bad", &config), "bad");
        assert_eq!(colorize_id("A", &config), "A");
        assert_eq!(step_icon(false, &config), "-");
        assert_eq!(colorize_kind(OperationKind::Filter, &config), "filter   ");
    }
}
