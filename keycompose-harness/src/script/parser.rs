use keycompose_core::ModifierState;
use logos::{Lexer, Logos};

use super::{KeyAction, KeyStroke, ScriptStep, Token};
use crate::error::ScriptError;
use crate::host::ContextId;

pub struct Parser<'a> {
    lexer: Lexer<'a, Token>,
    line: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Token::lexer(input),
            line: 1,
        }
    }

    pub fn parse(&mut self) -> Result<Vec<ScriptStep>, ScriptError> {
        let mut steps = Vec::new();

        while let Some(token) = self.next_token()? {
            match token {
                Token::Newline => self.line += 1,
                Token::Chord(chord) => {
                    let stroke = parse_chord(&chord).map_err(|m| ScriptError::new(self.line, m))?;
                    steps.push(ScriptStep::Key {
                        line: self.line,
                        stroke,
                    });
                }
                Token::Focus => steps.push(ScriptStep::Focus(self.context_id("@focus")?)),
                Token::Blur => steps.push(ScriptStep::Blur(self.context_id("@blur")?)),
                Token::Number(_) => {
                    return Err(ScriptError::new(self.line, "Context id outside of @focus/@blur"))
                }
            }
        }

        Ok(steps)
    }

    fn next_token(&mut self) -> Result<Option<Token>, ScriptError> {
        match self.lexer.next() {
            Some(Ok(token)) => Ok(Some(token)),
            Some(Err(())) => Err(ScriptError::new(
                self.line,
                format!("Unexpected input: '{}'", self.lexer.slice()),
            )),
            None => Ok(None),
        }
    }

    fn context_id(&mut self, directive: &str) -> Result<ContextId, ScriptError> {
        match self.next_token()? {
            Some(Token::Number(Some(id))) => Ok(ContextId(id)),
            _ => Err(ScriptError::new(
                self.line,
                format!("{} expects a context id", directive),
            )),
        }
    }
}

/// Parses a whole key script
pub fn parse_script(input: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    Parser::new(input).parse()
}

/// Splits `[+|-][mod+]*Code` into a stroke
fn parse_chord(chord: &str) -> Result<KeyStroke, String> {
    let (action, rest) = match chord.as_bytes().first() {
        Some(b'+') => (KeyAction::Down, &chord[1..]),
        Some(b'-') => (KeyAction::Up, &chord[1..]),
        _ => (KeyAction::Press, chord),
    };

    let mut parts: Vec<&str> = rest.split('+').collect();
    let code = match parts.pop() {
        Some(code) if !code.is_empty() => code,
        _ => return Err(format!("Missing key code in '{}'", chord)),
    };
    let modifiers = apply_modifiers(&parts).map_err(|m| format!("{} in '{}'", m, chord))?;
    if modifiers.alt {
        // alt layers are reached through the sticky AltRight key only
        return Err(format!("Use +AltRight/-AltRight instead of alt in '{}'", chord));
    }

    Ok(KeyStroke {
        action,
        code: code.to_string(),
        caps_lock: modifiers.caps_lock,
        ctrl: modifiers.ctrl,
        shift: modifiers.shift,
    })
}

fn apply_modifiers(names: &[&str]) -> Result<ModifierState, String> {
    let mut modifiers = ModifierState::default();
    for name in names {
        match name.to_ascii_lowercase().as_str() {
            "caps" => modifiers.caps_lock = true,
            "ctrl" => modifiers.ctrl = true,
            "shift" => modifiers.shift = true,
            "alt" => modifiers.alt = true,
            "" => return Err("Empty modifier".to_string()),
            other => return Err(format!("Unknown modifier '{}'", other)),
        }
    }
    Ok(modifiers)
}

/// Parses a modifier list like `caps+shift` (or `default` for none)
pub fn parse_modifiers(input: &str) -> Result<ModifierState, String> {
    let input = input.trim();
    if input.is_empty() || input == "default" {
        return Ok(ModifierState::default());
    }
    let names: Vec<&str> = input.split('+').collect();
    apply_modifiers(&names)
}
