use crate::error::{ErrorContext, LocatorError};
use colored::Colorize;

pub fn format_error_chain(error: &LocatorError) -> String {
    let context = ErrorContext::new(error);
    context.to_string()
}

/// Format error for display on a terminal, optionally colorized.
pub fn format_error_with_color(error: &LocatorError, use_color: bool) -> String {
    if !use_color {
        return format_error_chain(error);
    }

    let context = ErrorContext::new(error);
    let mut output = format!("{} {error}\n", "Error:".red().bold());

    if let Some(details) = &context.details {
        output.push_str(&format!("\n{details}\n"));
    }

    if let Some(suggestion) = &context.suggestion {
        output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
        for line in suggestion.lines().filter(|l| !l.trim().is_empty()) {
            output.push_str(&format!("{}\n", format!("• {line}").cyan()));
        }
    }

    output
}
