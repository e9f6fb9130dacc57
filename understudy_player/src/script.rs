// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay scripts: player operations as text.
//!
//! A script is a list of statements such as `await mouse.to(120, 48)`, one per line, in
//! the same vocabulary as the [`Player`] operations. Statements without `await` start their
//! action and move on immediately, so it runs alongside the next one.
//!
//! ```
//! use understudy_player::{AnimateOptions, Call, Statement};
//!
//! let s: Statement = "await mouse.click({ duration: .4 })".parse().unwrap();
//! assert!(s.awaited);
//! assert_eq!(
//!     s.call,
//!     Call::Click { options: AnimateOptions::new().duration(0.4) }
//! );
//! assert_eq!(s.to_string(), "await mouse.click({ duration: .4 })");
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::action::ActionId;
use crate::controller::Prop;
use crate::host::Document;
use crate::options::AnimateOptions;
use crate::player::Player;
use crate::tween::{ParseEaseError, TweenEngine};

/// The name scripts use for the player.
pub const RECEIVER: &str = "mouse";

/// One player operation with its arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    /// `to(x, y, options?)`
    To {
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
        /// Animation overrides.
        options: AnimateOptions,
    },
    /// `move(dx, dy, options?)`
    Move {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
        /// Animation overrides.
        options: AnimateOptions,
    },
    /// `delay(seconds)`
    Delay {
        /// Unscaled wait.
        seconds: f64,
    },
    /// `hide(options?)`
    Hide {
        /// Animation overrides.
        options: AnimateOptions,
    },
    /// `show(options?)`
    Show {
        /// Animation overrides.
        options: AnimateOptions,
    },
    /// `click(options?)`
    Click {
        /// Animation overrides.
        options: AnimateOptions,
    },
    /// `scrollTo(x, y, options?)`
    ScrollTo {
        /// Target `scrollLeft`.
        x: f64,
        /// Target `scrollTop`.
        y: f64,
        /// Animation overrides.
        options: AnimateOptions,
    },
    /// `scroll(dx, dy, options?)`
    Scroll {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
        /// Animation overrides.
        options: AnimateOptions,
    },
    /// `speed(value)`
    Speed {
        /// New playback rate.
        value: f64,
    },
    /// `initHoversHack()`
    InitHoversHack,
    /// `initReactEvents( document.body.firstChild )`
    InitReactEvents,
}

impl Call {
    /// The operation name as scripts spell it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::To { .. } => "to",
            Self::Move { .. } => "move",
            Self::Delay { .. } => "delay",
            Self::Hide { .. } => "hide",
            Self::Show { .. } => "show",
            Self::Click { .. } => "click",
            Self::ScrollTo { .. } => "scrollTo",
            Self::Scroll { .. } => "scroll",
            Self::Speed { .. } => "speed",
            Self::InitHoversHack => "initHoversHack",
            Self::InitReactEvents => "initReactEvents",
        }
    }
}

/// Format a number the way scripts write it: shortest form, no leading zero on fractions.
pub(crate) fn number(v: f64) -> String {
    if v == 0.0 {
        return "0".into();
    }
    let s = v.to_string();
    if let Some(rest) = s.strip_prefix("0.") {
        format!(".{rest}")
    } else if let Some(rest) = s.strip_prefix("-0.") {
        format!("-.{rest}")
    } else {
        s
    }
}

struct Options<'a>(&'a AnimateOptions);

impl fmt::Display for Options<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Vec::new();
        if let Some(d) = self.0.duration {
            fields.push(format!("duration: {}", number(d)));
        }
        if let Some(d) = self.0.delay {
            fields.push(format!("delay: {}", number(d)));
        }
        if let Some(e) = self.0.ease {
            fields.push(format!("ease: '{e}'"));
        }
        write!(f, "{{ {} }}", fields.join(", "))
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Self::To { x, y, options }
            | Self::Move {
                dx: x,
                dy: y,
                options,
            }
            | Self::ScrollTo { x, y, options }
            | Self::Scroll {
                dx: x,
                dy: y,
                options,
            } => {
                write!(f, "{name}({}, {}", number(*x), number(*y))?;
                if !options.is_empty() {
                    write!(f, ", {}", Options(options))?;
                }
                f.write_str(")")
            }
            Self::Hide { options } | Self::Show { options } | Self::Click { options } => {
                if options.is_empty() {
                    write!(f, "{name}()")
                } else {
                    write!(f, "{name}({})", Options(options))
                }
            }
            Self::Delay { seconds: v } | Self::Speed { value: v } => {
                write!(f, "{name}({})", number(*v))
            }
            Self::InitHoversHack => write!(f, "{name}()"),
            Self::InitReactEvents => write!(f, "{name}( document.body.firstChild )"),
        }
    }
}

/// A [`Call`] addressed to [`RECEIVER`], optionally awaited.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    /// Whether the script waits for the action before the next statement.
    pub awaited: bool,
    /// The operation.
    pub call: Call,
}

impl Statement {
    /// `await mouse.<call>`
    pub fn awaited(call: Call) -> Self {
        Self {
            awaited: true,
            call,
        }
    }

    /// `mouse.<call>`, running alongside whatever follows.
    pub fn detached(call: Call) -> Self {
        Self {
            awaited: false,
            call,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.awaited {
            f.write_str("await ")?;
        }
        write!(f, "{RECEIVER}.{}", self.call)
    }
}

/// Why a statement failed to parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseCallError {
    /// Not of the form `receiver.operation(...)`.
    #[error("expected `{RECEIVER}.<operation>(...)`")]
    NotACall,
    /// The operation is not part of the vocabulary.
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
    /// Wrong number or kind of arguments.
    #[error("`{op}` expects {expected}")]
    Arguments {
        /// Operation name.
        op: &'static str,
        /// What the operation accepts.
        expected: &'static str,
    },
    /// An argument that should be a number is not.
    #[error("invalid number `{0}`")]
    Number(String),
    /// An options object with an unsupported key.
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    /// An unknown ease name.
    #[error(transparent)]
    Ease(#[from] ParseEaseError),
}

/// A parse failure at a given script line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    /// One-based line number.
    pub line: usize,
    /// What went wrong.
    #[source]
    pub source: ParseCallError,
}

/// Split `s` on commas that are not inside braces or quotes.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_i32;
    let mut quote = None;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '{') => depth += 1,
            (None, '}') => depth -= 1,
            (None, ',') if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = s[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    parts
}

fn parse_number(s: &str) -> Result<f64, ParseCallError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseCallError::Number(s.trim().to_owned()))
}

fn parse_options(s: &str) -> Result<AnimateOptions, ParseCallError> {
    let inner = s
        .trim()
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or(ParseCallError::NotACall)?;
    let mut options = AnimateOptions::new();
    for field in split_top_level(inner) {
        if field.is_empty() {
            continue;
        }
        let (key, value) = field
            .split_once(':')
            .ok_or_else(|| ParseCallError::UnknownOption(field.to_owned()))?;
        let value = value.trim();
        match key.trim() {
            "duration" => options.duration = Some(parse_number(value)?),
            "delay" => options.delay = Some(parse_number(value)?),
            "ease" => {
                let name = value.trim_matches(|c| c == '\'' || c == '"');
                options.ease = Some(name.parse()?);
            }
            other => return Err(ParseCallError::UnknownOption(other.to_owned())),
        }
    }
    Ok(options)
}

/// `(a, b, options?)`
fn pair(
    op: &'static str,
    args: &[&str],
) -> Result<(f64, f64, AnimateOptions), ParseCallError> {
    let options = match args {
        [_, _] => AnimateOptions::new(),
        [_, _, o] => parse_options(o)?,
        _ => {
            return Err(ParseCallError::Arguments {
                op,
                expected: "two numbers and optional options",
            });
        }
    };
    Ok((parse_number(args[0])?, parse_number(args[1])?, options))
}

/// `(options?)`
fn options_only(op: &'static str, args: &[&str]) -> Result<AnimateOptions, ParseCallError> {
    match args {
        [] => Ok(AnimateOptions::new()),
        [o] => parse_options(o),
        _ => Err(ParseCallError::Arguments {
            op,
            expected: "optional options",
        }),
    }
}

/// `(value)`
fn single(op: &'static str, args: &[&str]) -> Result<f64, ParseCallError> {
    match args {
        [v] => parse_number(v),
        _ => Err(ParseCallError::Arguments {
            op,
            expected: "one number",
        }),
    }
}

impl FromStr for Call {
    type Err = ParseCallError;

    /// Parse `operation(args)` without a receiver.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, rest) = s.split_once('(').ok_or(ParseCallError::NotACall)?;
        let inner = rest
            .trim_end()
            .strip_suffix(')')
            .ok_or(ParseCallError::NotACall)?;
        let args = split_top_level(inner);
        let call = match name.trim() {
            "to" => {
                let (x, y, options) = pair("to", &args)?;
                Self::To { x, y, options }
            }
            "move" => {
                let (dx, dy, options) = pair("move", &args)?;
                Self::Move { dx, dy, options }
            }
            "scrollTo" => {
                let (x, y, options) = pair("scrollTo", &args)?;
                Self::ScrollTo { x, y, options }
            }
            "scroll" => {
                let (dx, dy, options) = pair("scroll", &args)?;
                Self::Scroll { dx, dy, options }
            }
            "hide" => Self::Hide {
                options: options_only("hide", &args)?,
            },
            "show" => Self::Show {
                options: options_only("show", &args)?,
            },
            "click" => Self::Click {
                options: options_only("click", &args)?,
            },
            "delay" => Self::Delay {
                seconds: single("delay", &args)?,
            },
            "speed" => Self::Speed {
                value: single("speed", &args)?,
            },
            "initHoversHack" => Self::InitHoversHack,
            // The root argument names a host object; the player resolves it itself.
            "initReactEvents" => Self::InitReactEvents,
            other => return Err(ParseCallError::UnknownOperation(other.to_owned())),
        };
        Ok(call)
    }
}

/// Strip `await` and the receiver, returning `(awaited, call text)`.
fn split_statement(s: &str) -> Option<(bool, &str)> {
    let s = s.trim().trim_end_matches(';').trim_end();
    let (awaited, s) = match s.strip_prefix("await") {
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim_start()),
        _ => (false, s),
    };
    let call = s.strip_prefix(RECEIVER)?.strip_prefix('.')?;
    Some((awaited, call))
}

impl FromStr for Statement {
    type Err = ParseCallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (awaited, call) = split_statement(s).ok_or(ParseCallError::NotACall)?;
        Ok(Self {
            awaited,
            call: call.parse()?,
        })
    }
}

/// Parse every player statement of `script`.
///
/// Blank lines, `//` comments and lines that do not address [`RECEIVER`] (imports, player
/// construction) are skipped.
pub fn parse_script(script: &str) -> Result<Vec<Statement>, ScriptError> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .filter_map(|(i, line)| split_statement(line).map(|(awaited, call)| (i, awaited, call)))
        .map(|(i, awaited, call)| {
            call.parse()
                .map(|call| Statement { awaited, call })
                .map_err(|source| ScriptError { line: i + 1, source })
        })
        .collect()
}

impl<K, D, E> Player<K, D, E>
where
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    D: Document<K>,
    E: TweenEngine<Prop<K>>,
{
    /// Start the action for `call`.
    ///
    /// `initHoversHack` needs a styler only the host can provide, so it is skipped here;
    /// `initReactEvents` uses the document body as the root.
    pub fn apply(&mut self, call: &Call) -> ActionId {
        match *call {
            Call::To { x, y, options } => self.to(x, y, options),
            Call::Move { dx, dy, options } => self.move_by(dx, dy, options),
            Call::Delay { seconds } => self.delay(seconds),
            Call::Hide { options } => self.hide(options),
            Call::Show { options } => self.show(options),
            Call::Click { options } => self.click(options),
            Call::ScrollTo { x, y, options } => self.scroll_to(x, y, options, None),
            Call::Scroll { dx, dy, options } => self.scroll(dx, dy, options, None),
            Call::Speed { value } => {
                self.set_speed(value);
                self.finished()
            }
            Call::InitHoversHack => {
                tracing::debug!("initHoversHack in a script is left to the host");
                self.finished()
            }
            Call::InitReactEvents => {
                let body = self.doc.body();
                self.init_react_events(body);
                self.finished()
            }
        }
    }

    /// Play a recorded script to the end.
    ///
    /// The whole script is parsed before anything plays. Awaited statements are finished
    /// before the next one starts; the rest run alongside. Returns the number of statements
    /// played once every action has settled.
    pub fn play_script(&mut self, script: &str) -> Result<usize, ScriptError> {
        let statements = parse_script(script)?;
        for statement in &statements {
            let id = self.apply(&statement.call);
            if statement.awaited {
                self.finish(id);
            }
        }
        self.finish_all();
        Ok(statements.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::{Curve, Ease};

    #[test]
    fn numbers_drop_leading_zero() {
        assert_eq!(number(0.4), ".4");
        assert_eq!(number(-0.25), "-.25");
        assert_eq!(number(120.0), "120");
        assert_eq!(number(-0.0), "0");
        assert_eq!(number(12.5), "12.5");
    }

    #[test]
    fn statements_render_in_script_form() {
        let cases = [
            (
                Statement::awaited(Call::To {
                    x: 10.0,
                    y: 20.0,
                    options: AnimateOptions::new(),
                }),
                "await mouse.to(10, 20)",
            ),
            (
                Statement::detached(Call::To {
                    x: 10.0,
                    y: 20.0,
                    options: AnimateOptions::new(),
                }),
                "mouse.to(10, 20)",
            ),
            (
                Statement::awaited(Call::ScrollTo {
                    x: 0.0,
                    y: 480.0,
                    options: AnimateOptions::new(),
                }),
                "await mouse.scrollTo(0, 480)",
            ),
            (
                Statement::awaited(Call::Delay { seconds: 0.2 }),
                "await mouse.delay(.2)",
            ),
            (
                Statement::awaited(Call::Hide {
                    options: AnimateOptions::new()
                        .duration(0.5)
                        .ease(Ease::Out(Curve::Sine)),
                }),
                "await mouse.hide({ duration: .5, ease: 'sine.out' })",
            ),
            (Statement::awaited(Call::Show { options: AnimateOptions::new() }), "await mouse.show()"),
            (
                Statement::detached(Call::InitReactEvents),
                "mouse.initReactEvents( document.body.firstChild )",
            ),
        ];
        for (statement, text) in cases {
            assert_eq!(statement.to_string(), text);
            assert_eq!(text.parse::<Statement>().unwrap(), statement);
        }
    }

    #[test]
    fn parser_accepts_semicolons_and_spacing() {
        let s: Statement = "  await mouse.move( -5 , 12.5 , {delay: 1, ease: \"power2.in\"} );"
            .parse()
            .unwrap();
        assert_eq!(
            s.call,
            Call::Move {
                dx: -5.0,
                dy: 12.5,
                options: AnimateOptions::new()
                    .delay(1.0)
                    .ease(Ease::In(Curve::Power2)),
            }
        );
    }

    #[test]
    fn parser_reports_bad_input() {
        assert_eq!(
            "mouse.jump(1, 2)".parse::<Statement>(),
            Err(ParseCallError::UnknownOperation("jump".into()))
        );
        assert_eq!(
            "mouse.to(1)".parse::<Statement>(),
            Err(ParseCallError::Arguments {
                op: "to",
                expected: "two numbers and optional options",
            })
        );
        assert_eq!(
            "mouse.delay(soon)".parse::<Statement>(),
            Err(ParseCallError::Number("soon".into()))
        );
        assert_eq!(
            "mouse.click({ speed: 2 })".parse::<Statement>(),
            Err(ParseCallError::UnknownOption("speed".into()))
        );
        assert!(matches!(
            "mouse.click({ ease: 'wobble' })".parse::<Statement>(),
            Err(ParseCallError::Ease(_))
        ));
        assert_eq!(
            "player.to(1, 2)".parse::<Statement>(),
            Err(ParseCallError::NotACall)
        );
    }

    #[test]
    fn scripts_skip_bootstrap_and_comments() {
        let script = "\
// Url: http://localhost/
const mouse = createVirtualMousePlayer({
\thideScrollbar: true,
})
await mouse.initHoversHack()

mouse.to(3, 4)
await mouse.scrollTo(0, 100)
";
        let statements = parse_script(script).unwrap();
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0].call, Call::InitHoversHack);
        assert!(!statements[1].awaited);
        assert!(statements[2].awaited);
    }

    #[test]
    fn script_errors_carry_line_numbers() {
        let err = parse_script("await mouse.to(1, 2)\n\nawait mouse.fly()").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.source, ParseCallError::UnknownOperation("fly".into()));
    }
}
