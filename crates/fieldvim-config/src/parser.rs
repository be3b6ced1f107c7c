//! The configuration language parser.
//!
//! Line-oriented, whitespace-tokenized, fail-fast: the first offending line
//! aborts the whole parse. Statements mutate a working copy that starts as
//! the built-in default configuration, so user text is a delta over the
//! defaults.

use crate::config::Configuration;
use crate::settings::{Setting, SettingValue, SiteOverride};
use fieldvim_keys::{normalize_keyspec, Action, CommandName, Mode};
use regex::Regex;
use thiserror::Error;

/// A configuration error: the offending 1-based line and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}: {reason}")]
pub struct ParseError {
    pub line: usize,
    pub reason: String,
}

/// Parse configuration text into a [`Configuration`], starting from the
/// built-in defaults.
pub fn parse_configuration(text: &str) -> Result<Configuration, ParseError> {
    parse_with_base(text, crate::default_configuration().clone())
}

pub(crate) fn parse_with_base(
    text: &str,
    mut config: Configuration,
) -> Result<Configuration, ParseError> {
    for (index, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line.split([' ', '\t']).filter(|t| !t.is_empty()).collect();
        if tokens.is_empty() || tokens[0].starts_with('#') {
            continue;
        }
        apply_line(&mut config, &tokens).map_err(|reason| ParseError {
            line: index + 1,
            reason,
        })?;
    }
    Ok(config)
}

fn apply_line(config: &mut Configuration, tokens: &[&str]) -> Result<(), String> {
    match tokens[0] {
        "unmapAll" => {
            if tokens.len() != 1 {
                return Err("unmapAll does not take any arguments".into());
            }
            config.insert.clear();
            config.normal.clear();
            config.visual.clear();
            config.motion.clear();
            Ok(())
        }
        "set" => apply_set(config, tokens),
        "setOn" => apply_set_on(config, tokens),
        keyword => apply_map(config, keyword, tokens),
    }
}

fn apply_set(config: &mut Configuration, tokens: &[&str]) -> Result<(), String> {
    if tokens.len() < 3 {
        return Err("not enough arguments for set".into());
    }
    if tokens.len() > 3 {
        return Err("too many arguments for set".into());
    }
    let (setting, value) = validate_setting(tokens[1], tokens[2])?;
    config.settings.set(setting, value);
    Ok(())
}

/// `setOn <name> <value> [<name> <value>...] <sitePattern>`
fn apply_set_on(config: &mut Configuration, tokens: &[&str]) -> Result<(), String> {
    if tokens.len() < 4 {
        return Err("not enough arguments for setOn".into());
    }
    if tokens.len() % 2 != 0 {
        return Err("each setting must have a value".into());
    }

    let site = tokens[tokens.len() - 1];
    if Regex::new(&format!("^{}$", site)).is_err() {
        return Err(format!("invalid site pattern '{}'", site));
    }

    for pair in tokens[1..tokens.len() - 1].chunks(2) {
        let (setting, value) = validate_setting(pair[0], pair[1])?;
        config.site_overrides.push(SiteOverride {
            site: site.to_string(),
            setting,
            value,
        });
    }
    Ok(())
}

fn validate_setting(name: &str, raw: &str) -> Result<(Setting, SettingValue), String> {
    let setting =
        Setting::from_name(name).ok_or_else(|| format!("unknown setting '{}'", name))?;
    let value = setting
        .validate(raw)
        .map_err(|err| format!("invalid value '{}' for {}: {}", raw, name, err))?;
    Ok((setting, value))
}

/// The modes each map keyword targets.
fn map_targets(keyword: &str) -> Option<&'static [Mode]> {
    Some(match keyword {
        "nmap" => &[Mode::Normal],
        "imap" => &[Mode::Insert],
        "xmap" => &[Mode::Visual],
        "omap" => &[Mode::Motion],
        "oxmap" => &[Mode::Motion, Mode::Visual],
        "map" => &[Mode::Normal, Mode::Visual, Mode::Motion],
        "map!" => &[Mode::Normal, Mode::Visual, Mode::Motion, Mode::Insert],
        _ => return None,
    })
}

fn apply_map(config: &mut Configuration, keyword: &str, tokens: &[&str]) -> Result<(), String> {
    let modes =
        map_targets(keyword).ok_or_else(|| format!("unknown statement type '{}'", keyword))?;
    if tokens.len() < 2 {
        return Err(format!("not enough arguments for '{}'", keyword));
    }

    let combo = normalize_keyspec(tokens[1]).map_err(|err| err.to_string())?;

    let is_operator = tokens.get(2) == Some(&"operator");
    let command_tokens = if is_operator { &tokens[3..] } else { &tokens[2..] };
    if is_operator && command_tokens.is_empty() {
        return Err("empty operator".into());
    }

    let commands = command_tokens
        .iter()
        .map(|token| token.parse::<CommandName>().map_err(|err| err.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    let action = if is_operator {
        Action::operator(commands.clone())
    } else {
        Action::command(commands.clone())
    };

    for mode in modes {
        if let Some(keymap) = config.keymap_mut(*mode) {
            if commands.is_empty() {
                keymap.unbind(&combo);
            } else {
                keymap.bind(combo.clone(), action.clone());
            }
        }
    }
    Ok(())
}
