// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! Random password generation for new accounts.

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::SyspassError;

pub const DEFAULT_LENGTH: usize = 20;
pub const DEFAULT_CHARS: &[&str] = &["ascii_letters", "digits", ".,:-_"];

const ASCII_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const ASCII_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const HEXDIGITS: &str = "0123456789abcdefABCDEF";
const OCTDIGITS: &str = "01234567";
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Length and character sets of a generated password.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub length: usize,
    /// Each entry is either a class name (e.g. `digits`) or a literal set of
    /// characters (e.g. `.,:-_`).
    pub chars: Vec<String>,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            chars: DEFAULT_CHARS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl PasswordPolicy {
    /// Characters of every set, one `Vec` per non-empty set.
    pub fn classes(&self) -> Vec<Vec<char>> {
        self.chars
            .iter()
            .map(|token| expand(token).chars().collect::<Vec<_>>())
            .filter(|class| !class.is_empty())
            .collect()
    }

    /// Union of all sets, without duplicates, in first-seen order.
    pub fn alphabet(&self) -> Vec<char> {
        let mut alphabet = Vec::new();
        for c in self.classes().into_iter().flatten() {
            if !alphabet.contains(&c) {
                alphabet.push(c);
            }
        }
        alphabet
    }
}

/// Expands a class name into its characters; anything else is literal.
fn expand(token: &str) -> String {
    match token {
        "ascii_letters" | "letters" => format!("{}{}", ASCII_LOWERCASE, ASCII_UPPERCASE),
        "ascii_lowercase" => ASCII_LOWERCASE.to_owned(),
        "ascii_uppercase" => ASCII_UPPERCASE.to_owned(),
        "digits" => DIGITS.to_owned(),
        "hexdigits" => HEXDIGITS.to_owned(),
        "octdigits" => OCTDIGITS.to_owned(),
        "punctuation" => PUNCTUATION.to_owned(),
        literal => literal.to_owned(),
    }
}

/// Generate a password with the thread-local CSPRNG.
pub fn generate(policy: &PasswordPolicy) -> Result<String> {
    generate_with_rng(policy, &mut rand::thread_rng())
}

/// Generate a password following `policy`.
///
/// When the password is long enough, it holds at least one character of every
/// set. Other positions are drawn uniformly from the whole alphabet.
///
/// # Errors
///
/// Returns an error if `length` is zero or if the sets contain no character.
pub fn generate_with_rng<R: Rng + ?Sized>(policy: &PasswordPolicy, rng: &mut R) -> Result<String> {
    if policy.length == 0 {
        return Err(SyspassError::Password("length must be at least 1".to_owned()).into());
    }
    let alphabet = policy.alphabet();
    if alphabet.is_empty() {
        return Err(SyspassError::Password("no characters to choose from".to_owned()).into());
    }

    let classes = policy.classes();
    let mut password: Vec<char> = Vec::with_capacity(policy.length);
    if policy.length >= classes.len() {
        for class in &classes {
            if let Some(c) = class.choose(rng) {
                password.push(*c);
            }
        }
    }
    while password.len() < policy.length {
        password.push(alphabet[rng.gen_range(0..alphabet.len())]);
    }
    password.shuffle(rng);

    Ok(password.into_iter().collect())
}
