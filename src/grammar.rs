//! Grammar storage, source-text parsing, and serialization.
//!
//! A [`Grammar`] holds the turtle rotation angle, the rewrite [`RuleSet`],
//! and the growing list of generation strings, starting with the axiom.
//! [`Grammar::parse`] consumes preprocessed source text (see
//! [`preprocess`]); [`Grammar::to_source`] writes the angle, generation
//! count, axiom, and rules back out in the same textual form.

use crate::error::{LsysError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from a single symbol to its replacement string.
///
/// Ordered, so serializing a grammar back to source text is deterministic.
/// Inserting a symbol twice keeps the later replacement (last wins).
pub type RuleSet = BTreeMap<char, String>;

/// A parsed L-System grammar together with every generation expanded so far.
///
/// `generations()[0]` is the axiom; entry `i` is the rewrite of entry
/// `i - 1`. The list is seeded with the axiom at construction and is
/// append-only, so it is never empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// Rotation angle in degrees applied by the turtle's turn symbols.
    pub angle_degrees: f32,
    /// Total number of generations (axiom included) the source asked for.
    pub target_generations: usize,
    /// Symbol rewrite rules.
    pub rules: RuleSet,
    generations: Vec<String>,
}

impl Grammar {
    /// Creates a grammar from its parts, seeding the generation list with
    /// `axiom`.
    pub fn new(
        angle_degrees: f32,
        target_generations: usize,
        rules: RuleSet,
        axiom: impl Into<String>,
    ) -> Self {
        Self {
            angle_degrees,
            target_generations,
            rules,
            generations: vec![axiom.into()],
        }
    }

    /// Parses preprocessed grammar source text.
    ///
    /// Expected line order: rotation angle, generation count, axiom, then
    /// zero or more `<symbol> <replacement>` rule lines. A repeated rule
    /// symbol overwrites the earlier replacement.
    ///
    /// # Errors
    ///
    /// [`LsysError::InvalidAngle`] / [`LsysError::InvalidGenerationCount`]
    /// when the header tokens are not valid numbers,
    /// [`LsysError::MissingAxiom`] when the source ends before the axiom
    /// line, and [`LsysError::MalformedRule`] when a rule line is not a
    /// one-character symbol followed by exactly one replacement token.
    pub fn parse(source: &str) -> Result<Self> {
        let mut lines = source.lines().map(str::trim).filter(|l| !l.is_empty());

        let angle_degrees = match lines.next() {
            Some(line) => line
                .parse::<f32>()
                .map_err(|_| LsysError::InvalidAngle(line.to_string()))?,
            None => return Err(LsysError::MissingAxiom),
        };
        let target_generations = match lines.next() {
            Some(line) => line
                .parse::<usize>()
                .map_err(|_| LsysError::InvalidGenerationCount(line.to_string()))?,
            None => return Err(LsysError::MissingAxiom),
        };
        let axiom = lines.next().ok_or(LsysError::MissingAxiom)?;

        let mut rules = RuleSet::new();
        for line in lines {
            let malformed = || LsysError::MalformedRule {
                line: line.to_string(),
            };

            let mut tokens = line.split_whitespace();
            let symbol_token = tokens.next().ok_or_else(malformed)?;
            let replacement = tokens.next().ok_or_else(malformed)?;
            if tokens.next().is_some() {
                return Err(malformed());
            }

            let mut symbol_chars = symbol_token.chars();
            let symbol = match (symbol_chars.next(), symbol_chars.next()) {
                (Some(c), None) => c,
                _ => return Err(malformed()),
            };
            rules.insert(symbol, replacement.to_string());
        }

        Ok(Self::new(angle_degrees, target_generations, rules, axiom))
    }

    /// Serializes the angle, generation count, axiom, and rules back to the
    /// source-text form accepted by [`Grammar::parse`].
    pub fn to_source(&self) -> String {
        let mut out = format!(
            "{}\n{}\n{}\n",
            self.angle_degrees,
            self.target_generations,
            self.axiom()
        );
        for (symbol, replacement) in &self.rules {
            out.push_str(&format!("{symbol} {replacement}\n"));
        }
        out
    }

    /// The seed string (generation 0).
    pub fn axiom(&self) -> &str {
        self.generations.first().map(String::as_str).unwrap_or("")
    }

    /// All generations expanded so far, axiom first.
    pub fn generations(&self) -> &[String] {
        &self.generations
    }

    /// The most recently expanded generation.
    pub fn latest(&self) -> &str {
        self.generations.last().map(String::as_str).unwrap_or("")
    }

    pub(crate) fn push_generation(&mut self, next: String) {
        self.generations.push(next);
    }
}

/// Strips `#` comments and blank lines from raw grammar text.
///
/// Each surviving line is trimmed and terminated with `\n`, so the result
/// always ends with a newline. [`Grammar::parse`] expects its input in this
/// form.
pub fn preprocess(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let line = match line.find('#') {
            Some(comment) => &line[..comment],
            None => line,
        };
        let line = line.trim();
        if !line.is_empty() {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
