//! Option declaration and command-line parsing
//!
//! Declares typed options with defaults and help text, resolves environment
//! overrides, and parses argv into a read-only set of values.

use crate::error::{CliError, Result};
use crate::utils::env::lookup_override;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// The type of value an option carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    /// Boolean switch, true when the flag is present
    Flag,
    /// Free-form string
    Str,
    /// Signed integer
    Int,
}

impl OptionKind {
    /// Human-readable name of the expected value, used in diagnostics
    pub fn expected(self) -> &'static str {
        match self {
            Self::Flag => "true or false",
            Self::Str => "a string",
            Self::Int => "an integer",
        }
    }
}

/// A resolved option value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionValue {
    Flag(bool),
    Str(String),
    Int(i64),
}

impl OptionValue {
    /// The kind this value belongs to
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Flag(_) => OptionKind::Flag,
            Self::Str(_) => OptionKind::Str,
            Self::Int(_) => OptionKind::Int,
        }
    }

    /// Coerce raw text into a value of the same kind as `self`
    fn coerce(&self, option: &str, raw: &str) -> Result<Self> {
        match self {
            Self::Flag(_) => match raw {
                "true" => Ok(Self::Flag(true)),
                "false" => Ok(Self::Flag(false)),
                _ => Err(CliError::invalid_value(option, raw, OptionKind::Flag.expected())),
            },
            Self::Str(_) => Ok(Self::Str(raw.to_string())),
            Self::Int(_) => raw
                .parse::<i64>()
                .map(Self::Int)
                .map_err(|_| CliError::invalid_value(option, raw, OptionKind::Int.expected())),
        }
    }

    /// Render the value for the usage listing
    pub fn display(&self) -> String {
        match self {
            Self::Flag(v) => v.to_string(),
            Self::Str(v) => v.clone(),
            Self::Int(v) => v.to_string(),
        }
    }
}

/// A single declared option, immutable once registered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Option name as given on the command line, without the leading dashes
    pub name: String,
    /// Default value; also fixes the option's kind
    pub default: OptionValue,
    /// One-line help text
    pub help: String,
}

impl OptionDescriptor {
    /// The kind of value this option accepts
    pub fn kind(&self) -> OptionKind {
        self.default.kind()
    }
}

/// Outcome of parsing an argument vector
#[derive(Debug)]
pub enum ParseOutcome {
    /// A reserved help token was present; no values were validated
    Help,
    /// Arguments parsed successfully
    Parsed(ParsedArguments),
}

/// Declares the options a tool accepts and parses argv against them
#[derive(Debug)]
pub struct ArgumentSpec {
    options: Vec<OptionDescriptor>,
    index: HashMap<String, usize>,
    env_prefix: Option<String>,
    name_rule: Regex,
}

impl ArgumentSpec {
    /// Create an empty spec
    pub fn new() -> Result<Self> {
        Ok(Self {
            options: Vec::new(),
            index: HashMap::new(),
            env_prefix: None,
            name_rule: Regex::new(r"^[a-z][a-z0-9-]*$")
                .map_err(|e| CliError::config(format!("failed to compile name rule: {}", e)))?,
        })
    }

    /// Set the prefix for environment-variable default overrides.
    ///
    /// With prefix `FSTAT`, option `limit` is overridden by `FSTAT_LIMIT`.
    /// Overrides are consulted once, before flag parsing, and lose to an
    /// explicit flag.
    pub fn env_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Register an option. The default value fixes the option's kind.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        default: OptionValue,
        help: impl Into<String>,
    ) -> Result<&mut Self> {
        let name = name.into();
        if !self.name_rule.is_match(&name) {
            return Err(CliError::invalid_option_name(name));
        }
        if self.index.contains_key(&name) {
            return Err(CliError::duplicate_option(name));
        }
        self.index.insert(name.clone(), self.options.len());
        self.options.push(OptionDescriptor {
            name,
            default,
            help: help.into(),
        });
        Ok(self)
    }

    /// Declared options in registration order
    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    /// Look up a declared option by name
    pub fn get(&self, name: &str) -> Option<&OptionDescriptor> {
        self.index.get(name).map(|&i| &self.options[i])
    }

    /// Parse an argument vector (without the program name).
    ///
    /// Recognized `--name=value` and `--name value` tokens are coerced to the
    /// declared kind; everything else is collected as a positional argument.
    /// A reserved `--help`/`-h` token before any `--` terminator wins over
    /// all other processing, including coercion errors.
    #[instrument(skip(self, argv))]
    pub fn parse<I>(&self, argv: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = String>,
    {
        let tokens: Vec<String> = argv.into_iter().collect();
        debug!("parsing {} token(s)", tokens.len());

        for token in &tokens {
            if token == "--" {
                break;
            }
            if token == "--help" || token == "-h" {
                debug!("help requested, skipping validation");
                return Ok(ParseOutcome::Help);
            }
        }

        let mut values = self.resolve_defaults();
        let mut positionals = Vec::new();

        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];

            if token == "--" {
                positionals.extend(tokens[i + 1..].iter().cloned());
                break;
            }

            let Some(body) = token.strip_prefix("--") else {
                positionals.push(token.clone());
                i += 1;
                continue;
            };

            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            let Some(descriptor) = self.get(name) else {
                positionals.push(token.clone());
                i += 1;
                continue;
            };

            let value = match (inline, descriptor.kind()) {
                (Some(raw), _) => descriptor.default.coerce(name, raw)?,
                (None, OptionKind::Flag) => OptionValue::Flag(true),
                (None, _) => {
                    let Some(raw) = tokens.get(i + 1) else {
                        return Err(CliError::invalid_value(
                            name,
                            "",
                            descriptor.kind().expected(),
                        ));
                    };
                    i += 1;
                    descriptor.default.coerce(name, raw)?
                }
            };
            values.insert(name.to_string(), value);
            i += 1;
        }

        Ok(ParseOutcome::Parsed(ParsedArguments { values, positionals }))
    }

    /// Defaults with environment overrides applied.
    ///
    /// A malformed override is ignored in favor of the declared default.
    fn resolve_defaults(&self) -> HashMap<String, OptionValue> {
        let mut values = HashMap::with_capacity(self.options.len());
        for descriptor in &self.options {
            let mut value = descriptor.default.clone();
            if let Some(prefix) = &self.env_prefix {
                if let Some(raw) = lookup_override(prefix, &descriptor.name) {
                    match descriptor.default.coerce(&descriptor.name, &raw) {
                        Ok(resolved) => {
                            debug!("option --{} overridden from environment", descriptor.name);
                            value = resolved;
                        }
                        Err(e) => {
                            debug!("ignoring malformed environment override: {}", e);
                        }
                    }
                }
            }
            values.insert(descriptor.name.clone(), value);
        }
        values
    }
}

/// Read-only view of a parsed invocation.
///
/// Holds exactly one value per declared option (default, environment
/// override, or explicit flag) plus the positional arguments in order.
#[derive(Debug)]
pub struct ParsedArguments {
    values: HashMap<String, OptionValue>,
    positionals: Vec<String>,
}

impl ParsedArguments {
    /// Resolved value of an option.
    ///
    /// # Panics
    /// Panics if `name` was never registered on the spec that produced this
    /// value; that is a bug in the tool, not bad input.
    pub fn value(&self, name: &str) -> &OptionValue {
        match self.values.get(name) {
            Some(value) => value,
            None => panic!("option --{} was never registered", name),
        }
    }

    /// Boolean value of a flag option.
    ///
    /// # Panics
    /// Panics if the option is undeclared or not a flag.
    pub fn flag(&self, name: &str) -> bool {
        match self.value(name) {
            OptionValue::Flag(v) => *v,
            other => panic!("option --{} is {:?}, not a flag", name, other.kind()),
        }
    }

    /// String value of a string option.
    ///
    /// # Panics
    /// Panics if the option is undeclared or not a string.
    pub fn str_value(&self, name: &str) -> &str {
        match self.value(name) {
            OptionValue::Str(v) => v,
            other => panic!("option --{} is {:?}, not a string", name, other.kind()),
        }
    }

    /// Integer value of an integer option.
    ///
    /// # Panics
    /// Panics if the option is undeclared or not an integer.
    pub fn int_value(&self, name: &str) -> i64 {
        match self.value(name) {
            OptionValue::Int(v) => *v,
            other => panic!("option --{} is {:?}, not an integer", name, other.kind()),
        }
    }

    /// Positional arguments in command-line order
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Validate the positional-argument count.
    ///
    /// `max` of `None` means unbounded.
    pub fn arity(&self, min: usize, max: Option<usize>) -> Result<()> {
        let actual = self.positionals.len();
        let ok = actual >= min && max.is_none_or(|max| actual <= max);
        if ok {
            return Ok(());
        }
        let expected = match max {
            Some(max) if max == min => format!("exactly {}", min),
            Some(max) => format!("between {} and {}", min, max),
            None => format!("at least {}", min),
        };
        Err(CliError::arity(expected, actual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::env::{remove_override, set_override};

    fn server_spec() -> ArgumentSpec {
        let mut spec = ArgumentSpec::new().unwrap();
        spec.register("port", OptionValue::Int(8080), "port to listen on")
            .unwrap();
        spec.register(
            "host",
            OptionValue::Str("localhost".to_string()),
            "host to listen on",
        )
        .unwrap();
        spec
    }

    fn parse(spec: &ArgumentSpec, argv: &[&str]) -> ParsedArguments {
        match spec.parse(argv.iter().map(|s| s.to_string())).unwrap() {
            ParseOutcome::Parsed(parsed) => parsed,
            ParseOutcome::Help => panic!("unexpected help outcome"),
        }
    }

    #[test]
    fn test_defaults_round_trip() {
        let spec = server_spec();
        let parsed = parse(&spec, &[]);
        assert_eq!(parsed.int_value("port"), 8080);
        assert_eq!(parsed.str_value("host"), "localhost");
        assert!(parsed.positionals().is_empty());
    }

    #[test]
    fn test_explicit_value_round_trip() {
        let spec = server_spec();
        let parsed = parse(&spec, &["--port=9090"]);
        assert_eq!(parsed.int_value("port"), 9090);
        assert_eq!(parsed.str_value("host"), "localhost");
    }

    #[test]
    fn test_space_separated_value() {
        let spec = server_spec();
        let parsed = parse(&spec, &["--host", "0.0.0.0", "--port", "80"]);
        assert_eq!(parsed.str_value("host"), "0.0.0.0");
        assert_eq!(parsed.int_value("port"), 80);
    }

    #[test]
    fn test_flag_forms() {
        let mut spec = ArgumentSpec::new().unwrap();
        spec.register("verbose", OptionValue::Flag(false), "more output")
            .unwrap();

        assert!(parse(&spec, &["--verbose"]).flag("verbose"));
        assert!(!parse(&spec, &["--verbose=false"]).flag("verbose"));
        // A bare flag never consumes the following token.
        let parsed = parse(&spec, &["--verbose", "input.txt"]);
        assert!(parsed.flag("verbose"));
        assert_eq!(parsed.positionals(), ["input.txt"]);
    }

    #[test]
    fn test_duplicate_registration() {
        let mut spec = server_spec();
        let err = spec
            .register("port", OptionValue::Int(0), "again")
            .unwrap_err();
        assert!(matches!(err, CliError::DuplicateOption { name } if name == "port"));
    }

    #[test]
    fn test_option_name_rules() {
        let mut spec = ArgumentSpec::new().unwrap();
        for bad in ["Port", "2fast", "with space", ""] {
            let err = spec
                .register(bad, OptionValue::Flag(false), "")
                .unwrap_err();
            assert!(matches!(err, CliError::InvalidOptionName { .. }));
        }
        spec.register("dry-run2", OptionValue::Flag(false), "").unwrap();
    }

    #[test]
    fn test_coercion_failure_names_option_and_raw() {
        let spec = server_spec();
        let err = spec
            .parse(vec!["--port=http".to_string()])
            .unwrap_err();
        match err {
            CliError::InvalidValue { option, raw, .. } => {
                assert_eq!(option, "port");
                assert_eq!(raw, "http");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_value_for_non_flag() {
        let spec = server_spec();
        let err = spec.parse(vec!["--host".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::InvalidValue { option, .. } if option == "host"));
    }

    #[test]
    fn test_unrecognized_tokens_are_positional() {
        let spec = server_spec();
        let parsed = parse(&spec, &["a.txt", "--unknown", "-x", "b.txt"]);
        assert_eq!(parsed.positionals(), ["a.txt", "--unknown", "-x", "b.txt"]);
    }

    #[test]
    fn test_double_dash_terminates_parsing() {
        let spec = server_spec();
        let parsed = parse(&spec, &["--port=1", "--", "--port=2", "-h"]);
        assert_eq!(parsed.int_value("port"), 1);
        assert_eq!(parsed.positionals(), ["--port=2", "-h"]);
    }

    #[test]
    fn test_help_wins_over_validation() {
        let spec = server_spec();
        for argv in [
            vec!["--help".to_string()],
            vec!["-h".to_string()],
            vec!["--port=bogus".to_string(), "--help".to_string()],
        ] {
            assert!(matches!(spec.parse(argv).unwrap(), ParseOutcome::Help));
        }
    }

    #[test]
    fn test_arity() {
        let spec = server_spec();
        let parsed = parse(&spec, &["one"]);
        parsed.arity(1, Some(1)).unwrap();
        parsed.arity(0, None).unwrap();

        let err = parsed.arity(2, Some(2)).unwrap_err();
        match err {
            CliError::Arity { expected, actual } => {
                assert_eq!(expected, "exactly 2");
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(parsed.arity(2, None).is_err());
        assert!(parse(&spec, &["a", "b", "c"]).arity(0, Some(2)).is_err());
    }

    #[test]
    fn test_env_override_and_flag_precedence() {
        let mut spec = server_spec();
        spec.env_prefix("SPECTEST");

        set_override("SPECTEST", "port", "7000");
        let parsed = parse(&spec, &[]);
        assert_eq!(parsed.int_value("port"), 7000);

        // An explicit flag wins over the environment.
        let parsed = parse(&spec, &["--port=9090"]);
        assert_eq!(parsed.int_value("port"), 9090);
        remove_override("SPECTEST", "port");
    }

    #[test]
    fn test_malformed_env_override_is_ignored() {
        let mut spec = server_spec();
        spec.env_prefix("SPECBAD");

        set_override("SPECBAD", "port", "not-a-number");
        let parsed = parse(&spec, &[]);
        assert_eq!(parsed.int_value("port"), 8080);
        remove_override("SPECBAD", "port");
    }
}
