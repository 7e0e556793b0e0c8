//! Command-line option validation
//!
//! Raw flag values come in as [`Flags`]; [`Flags::validate`] turns them into
//! either a help request or a checked [`Options`] value.

use thiserror::Error;

use crate::output::RenderConfig;

/// A bad, missing or contradictory flag. Reported together with usage text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandLineError {
    #[error("no expression specified")]
    MissingExpression,
    #[error("cannot use -color and -no-color together")]
    ConflictingColor,
}

/// Flag values exactly as given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    pub expression: String,
    pub contents_only: bool,
    pub color: bool,
    pub no_color: bool,
    pub no_children: bool,
    pub print_help: bool,
    pub verbose: bool,
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print usage and exit successfully; nothing else is checked
    Help,
    Query(Options),
}

/// Validated configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// XPath expression, never empty
    pub expression: String,
    pub contents_only: bool,
    pub color: bool,
    pub no_color: bool,
    pub no_children: bool,
    pub verbose: bool,
}

impl Flags {
    pub fn validate(self) -> Result<Invocation, CommandLineError> {
        if self.print_help {
            return Ok(Invocation::Help);
        }

        if self.expression.is_empty() {
            return Err(CommandLineError::MissingExpression);
        }

        if self.color && self.no_color {
            return Err(CommandLineError::ConflictingColor);
        }

        Ok(Invocation::Query(Options {
            expression: self.expression,
            contents_only: self.contents_only,
            color: self.color,
            no_color: self.no_color,
            no_children: self.no_children,
            verbose: self.verbose,
        }))
    }
}

impl Options {
    /// Render settings for each matched node
    pub fn render_config(&self, use_color: bool) -> RenderConfig {
        RenderConfig::new()
            .with_self(!self.contents_only)
            .with_color(use_color)
            .with_children(!self.no_children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(expression: &str) -> Flags {
        Flags {
            expression: expression.to_string(),
            ..Flags::default()
        }
    }

    #[test]
    fn test_missing_expression() {
        assert_eq!(Flags::default().validate(), Err(CommandLineError::MissingExpression));
        assert_eq!(
            CommandLineError::MissingExpression.to_string(),
            "no expression specified"
        );
    }

    #[test]
    fn test_color_flags_conflict() {
        let raw = Flags { color: true, no_color: true, ..flags("//a") };
        assert_eq!(raw.validate(), Err(CommandLineError::ConflictingColor));
        assert_eq!(
            CommandLineError::ConflictingColor.to_string(),
            "cannot use -color and -no-color together"
        );
    }

    #[test]
    fn test_missing_expression_reported_before_color_conflict() {
        let raw = Flags { color: true, no_color: true, ..Flags::default() };
        assert_eq!(raw.validate(), Err(CommandLineError::MissingExpression));
    }

    #[test]
    fn test_help_skips_validation() {
        let raw = Flags { print_help: true, color: true, no_color: true, ..Flags::default() };
        assert_eq!(raw.validate(), Ok(Invocation::Help));
    }

    #[test]
    fn test_valid_flags() {
        let raw = Flags { contents_only: true, no_color: true, ..flags("//item") };
        let Ok(Invocation::Query(options)) = raw.validate() else {
            panic!("expected query options");
        };
        assert_eq!(options.expression, "//item");
        assert!(options.contents_only);
        assert!(options.no_color);
        assert!(!options.no_children);
    }

    #[test]
    fn test_validation_is_repeatable() {
        let raw = Flags { color: true, no_children: true, ..flags("/root") };
        assert_eq!(raw.clone().validate(), raw.validate());
    }

    #[test]
    fn test_render_config() {
        let Ok(Invocation::Query(options)) = Flags { contents_only: true, ..flags("/r") }.validate() else {
            panic!("expected query options");
        };
        let config = options.render_config(true);
        assert!(!config.emit_self);
        assert!(config.use_color);
        assert!(config.emit_children);

        let Ok(Invocation::Query(options)) = Flags { no_children: true, ..flags("/r") }.validate() else {
            panic!("expected query options");
        };
        let config = options.render_config(false);
        assert!(config.emit_self);
        assert!(!config.use_color);
        assert!(!config.emit_children);
    }
}
