//! Command-line argument parsing with permute and POSIX-strict modes.
//!
//! [`ArgParser`] owns its mode instead of patching a shared parser type: the
//! `POSIXLY_CORRECT` environment variable is resolved once when the parser is
//! built, and both traversal strategies are explicit methods.
//!
//! - **Permute** (the default): recognized switches are consumed wherever
//!   they appear; positional arguments keep their relative order and end up
//!   grouped at the front of the residual list.
//! - **Strict order** (`POSIXLY_CORRECT` present, any value): switch
//!   scanning stops at the first positional argument; everything from there
//!   on is left untouched.
//!
//! Traversal results are explicit values, not callback side effects: every
//! parse returns the consumed switches as [`Matches`] alongside the residual
//! positional arguments.
//!
//! # Example
//!
//! ```
//! use requestkit::args::ArgParser;
//!
//! let parser = ArgParser::new()
//!     .flag("-v")
//!     .opt("--output")
//!     .strict_order(false);
//!
//! let argv: Vec<String> = ["-v", "in.txt", "--output", "out.txt", "extra"]
//!     .iter().map(ToString::to_string).collect();
//! let (matches, rest) = parser.parse(&argv).unwrap();
//!
//! assert!(matches.is_present("-v"));
//! assert_eq!(matches.value_of("--output"), Some("out.txt"));
//! assert_eq!(rest, ["in.txt", "extra"]);
//! ```

use crate::constants::ENV_POSIXLY_CORRECT;
use std::collections::HashMap;

/// Argument parsing error.
///
/// These are the only failure modes a traversal introduces; nothing is
/// retried or recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A token looked like a switch but matches no registered name.
    UnrecognizedSwitch(String),
    /// A value-taking switch appeared with no value following it.
    MissingArgument(String),
    /// A no-argument flag was given an inline `=value`.
    NeedlessArgument(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedSwitch(tok) => write!(f, "unrecognized switch: {tok}"),
            Self::MissingArgument(name) => write!(f, "missing argument for switch: {name}"),
            Self::NeedlessArgument(name) => write!(f, "switch takes no argument: {name}"),
        }
    }
}

impl std::error::Error for Error {}

/// One consumed switch occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Hit {
    /// Canonical (registered) switch name.
    name: String,
    /// The attached value for value-taking switches.
    value: Option<String>,
}

/// The switches a traversal consumed, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    hits: Vec<Hit>,
}

impl Matches {
    /// True if the switch was seen at least once.
    #[must_use]
    pub fn is_present(&self, name: &str) -> bool {
        self.hits.iter().any(|h| h.name == name)
    }

    /// How many times the switch was seen.
    #[must_use]
    pub fn occurrences(&self, name: &str) -> usize {
        self.hits.iter().filter(|h| h.name == name).count()
    }

    /// The last value given for a value-taking switch.
    ///
    /// Last wins, matching the usual command-line convention for repeated
    /// options.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.hits
            .iter()
            .rev()
            .find(|h| h.name == name)
            .and_then(|h| h.value.as_deref())
    }

    /// Every value given for a value-taking switch, in encounter order.
    #[must_use]
    pub fn values_of(&self, name: &str) -> Vec<&str> {
        self.hits
            .iter()
            .filter(|h| h.name == name)
            .filter_map(|h| h.value.as_deref())
            .collect()
    }

    /// Total number of consumed switch occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// True when no switches were consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    fn push(&mut self, name: &str, value: Option<String>) {
        self.hits.push(Hit {
            name: name.to_string(),
            value,
        });
    }
}

#[derive(Debug, Clone)]
struct SwitchSpec {
    canonical: String,
    takes_value: bool,
}

/// A registry of recognized switches plus the traversal mode.
///
/// Register switches with [`flag`](Self::flag) (no argument) and
/// [`opt`](Self::opt) (requires an argument), then parse with
/// [`parse`](Self::parse) / [`parse_mut`](Self::parse_mut) or call a
/// traversal mode directly.
#[derive(Debug, Clone)]
pub struct ArgParser {
    switches: HashMap<String, SwitchSpec>,
    strict: bool,
}

impl Default for ArgParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgParser {
    /// An empty parser; strict ordering follows the environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            switches: HashMap::new(),
            strict: strict_order_from_env(),
        }
    }

    /// Override the environment-resolved ordering mode.
    ///
    /// Mostly for tests, which should not depend on the process environment.
    #[must_use]
    pub const fn strict_order(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// True when [`parse`](Self::parse) will use strict ordering.
    #[must_use]
    pub const fn is_strict_order(&self) -> bool {
        self.strict
    }

    /// Register a no-argument switch (`-v` or `--verbose`).
    #[must_use]
    pub fn flag(mut self, name: &str) -> Self {
        self.switches.insert(
            name.to_string(),
            SwitchSpec {
                canonical: name.to_string(),
                takes_value: false,
            },
        );
        self
    }

    /// Register a value-taking switch (`-o FILE` or `--output FILE`).
    #[must_use]
    pub fn opt(mut self, name: &str) -> Self {
        self.switches.insert(
            name.to_string(),
            SwitchSpec {
                canonical: name.to_string(),
                takes_value: true,
            },
        );
        self
    }

    /// Register `alias` as another spelling of the already-registered
    /// `target`; matches report the target's name.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not registered. Aliasing happens at parser
    /// construction in test code, where failing fast beats a Result.
    #[must_use]
    pub fn alias(mut self, alias: &str, target: &str) -> Self {
        let spec = self
            .switches
            .get(target)
            .unwrap_or_else(|| panic!("alias target not registered: {target}"))
            .clone();
        self.switches.insert(alias.to_string(), spec);
        self
    }

    /// Parse per the configured mode: strict order when `POSIXLY_CORRECT`
    /// was present at construction (or [`strict_order`](Self::strict_order)
    /// said so), permuting otherwise.
    ///
    /// Operates on a copy; the caller's slice is never mutated. Returns the
    /// consumed switches and the residual arguments.
    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> Result<(Matches, Vec<String>), Error> {
        if self.strict {
            self.order(argv)
        } else {
            self.permute(argv)
        }
    }

    /// Destructive [`parse`](Self::parse): switches are removed from `argv`,
    /// positional arguments remain.
    pub fn parse_mut(&self, argv: &mut Vec<String>) -> Result<Matches, Error> {
        if self.strict {
            self.order_mut(argv)
        } else {
            self.permute_mut(argv)
        }
    }

    /// Strict traversal on a copy of `argv`.
    pub fn order<S: AsRef<str>>(&self, argv: &[S]) -> Result<(Matches, Vec<String>), Error> {
        let mut copy = to_owned(argv);
        let matches = self.order_mut(&mut copy)?;
        Ok((matches, copy))
    }

    /// Permuting traversal on a copy of `argv`.
    pub fn permute<S: AsRef<str>>(&self, argv: &[S]) -> Result<(Matches, Vec<String>), Error> {
        let mut copy = to_owned(argv);
        let matches = self.permute_mut(&mut copy)?;
        Ok((matches, copy))
    }

    /// Strict traversal: consume recognized switches from the front of
    /// `argv` and stop at the first positional argument (or after a `--`
    /// terminator, which is removed). Everything from the stopping point on
    /// remains in `argv` untouched.
    pub fn order_mut(&self, argv: &mut Vec<String>) -> Result<Matches, Error> {
        self.traverse(argv, false)
    }

    /// Permuting traversal: consume recognized switches wherever they
    /// appear before a `--` terminator. Positional arguments keep their
    /// relative order and are regrouped at the front of `argv`; tokens after
    /// `--` follow them unprocessed.
    pub fn permute_mut(&self, argv: &mut Vec<String>) -> Result<Matches, Error> {
        self.traverse(argv, true)
    }

    fn traverse(&self, argv: &mut Vec<String>, permute: bool) -> Result<Matches, Error> {
        let mut matches = Matches::default();
        // Positionals seen mid-scan (permute mode only) and the tail left
        // unscanned; final argv = positionals + tail.
        let mut positionals: Vec<String> = Vec::new();
        let mut tail: Vec<String> = Vec::new();

        let mut tokens = std::mem::take(argv).into_iter();
        while let Some(token) = tokens.next() {
            if token == "--" {
                tail.extend(tokens);
                break;
            }
            if is_switch(&token) {
                self.consume_switch(&token, &mut tokens, &mut matches)?;
            } else if permute {
                positionals.push(token);
            } else {
                tail.push(token);
                tail.extend(tokens);
                break;
            }
        }

        positionals.append(&mut tail);
        *argv = positionals;
        Ok(matches)
    }

    /// Consume one switch token, pulling its value from `rest` when needed.
    fn consume_switch(
        &self,
        token: &str,
        rest: &mut std::vec::IntoIter<String>,
        matches: &mut Matches,
    ) -> Result<(), Error> {
        if let Some(long) = token.strip_prefix("--") {
            let (name, inline) = match long.split_once('=') {
                Some((n, v)) => (format!("--{n}"), Some(v.to_string())),
                None => (token.to_string(), None),
            };
            let spec = self
                .switches
                .get(&name)
                .ok_or_else(|| Error::UnrecognizedSwitch(name.clone()))?;
            if spec.takes_value {
                let value = match inline {
                    Some(v) => v,
                    None => rest.next().ok_or_else(|| Error::MissingArgument(name))?,
                };
                matches.push(&spec.canonical, Some(value));
            } else {
                if inline.is_some() {
                    return Err(Error::NeedlessArgument(name));
                }
                matches.push(&spec.canonical, None);
            }
            return Ok(());
        }

        // Short switch cluster: each char is a flag, except that a
        // value-taking switch swallows the remainder of the cluster (or the
        // next token) as its value.
        let cluster = token.strip_prefix('-').unwrap_or(token);
        for (i, c) in cluster.char_indices() {
            let name = format!("-{c}");
            let spec = self
                .switches
                .get(&name)
                .ok_or_else(|| Error::UnrecognizedSwitch(name.clone()))?;
            if spec.takes_value {
                let after = &cluster[i + c.len_utf8()..];
                let value = if after.is_empty() {
                    rest.next().ok_or_else(|| Error::MissingArgument(name))?
                } else {
                    after.to_string()
                };
                matches.push(&spec.canonical, Some(value));
                break;
            }
            matches.push(&spec.canonical, None);
        }
        Ok(())
    }
}

/// A token counts as a switch when it starts with `-` and is not `-` alone.
/// `--` is the scan terminator and is handled before this check.
fn is_switch(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Presence of `POSIXLY_CORRECT` - any value, including empty - selects
/// strict ordering.
fn strict_order_from_env() -> bool {
    strict_order_from_value(std::env::var_os(ENV_POSIXLY_CORRECT).as_deref())
}

/// The pure decision [`strict_order_from_env`] applies, split out so tests
/// can cover it without mutating process-global environment.
const fn strict_order_from_value(value: Option<&std::ffi::OsStr>) -> bool {
    value.is_some()
}

fn to_owned<S: AsRef<str>>(argv: &[S]) -> Vec<String> {
    argv.iter().map(|s| s.as_ref().to_string()).collect()
}
