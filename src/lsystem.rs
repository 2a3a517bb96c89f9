//! Top-level L-System: parse, expand, draw.
//!
//! [`LSystem`] ties the pieces together: it parses grammar source into a
//! [`Grammar`], generates turtle geometry for the axiom, then rewrites and
//! generates generation by generation until the requested count is reached
//! or the geometry store's size ceiling stops further growth. Drawing
//! selects one generation's point range and normalizing transform and
//! hands both to the host's [`RenderBackend`].

use crate::error::{LsysError, Result};
use crate::geometry::{GeometryStore, IterationRecord};
use crate::grammar::{Grammar, preprocess};
use crate::interpreter::{InterpreterConfig, TurtleInterpreter};
use crate::render::RenderBackend;
use crate::rewrite::rewrite;
use glam::Mat4;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// A parsed L-System with line geometry for every expanded generation.
#[derive(Clone, Debug)]
pub struct LSystem {
    grammar: Grammar,
    store: GeometryStore,
    interpreter: TurtleInterpreter,
    /// Number of points the device has already received.
    uploaded: usize,
}

impl LSystem {
    /// Parses grammar source text and expands it.
    ///
    /// Comments and blank lines are stripped first. Geometry is generated
    /// for the axiom unconditionally, then generations are appended until
    /// the grammar's requested count is reached. Hitting the geometry size
    /// ceiling stops expansion early but is not an error: every generation
    /// produced so far stays valid and renderable.
    pub fn parse_str(text: &str) -> Result<Self> {
        Self::build(Grammar::parse(&preprocess(text))?, GeometryStore::default())
    }

    /// Like [`parse_str`](Self::parse_str), with an explicit geometry size
    /// ceiling in bytes.
    pub fn parse_str_with_limit(text: &str, max_bytes: usize) -> Result<Self> {
        Self::build(
            Grammar::parse(&preprocess(text))?,
            GeometryStore::new(max_bytes),
        )
    }

    /// Reads and parses a grammar file.
    ///
    /// # Errors
    ///
    /// [`LsysError::Io`] when the file cannot be opened or read; parse and
    /// interpretation errors as in [`parse_str`](Self::parse_str).
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse_str(&text)
    }

    /// Replaces this system's state with a fresh parse of `text`.
    ///
    /// Existing state is kept untouched unless the parse fully succeeds.
    pub fn reparse_str(&mut self, text: &str) -> Result<()> {
        *self = Self::parse_str(text)?;
        Ok(())
    }

    /// Replaces this system's state with a fresh parse of a grammar file.
    pub fn reparse_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        *self = Self::parse_file(path)?;
        Ok(())
    }

    fn build(grammar: Grammar, store: GeometryStore) -> Result<Self> {
        let mut system = Self {
            grammar,
            store,
            interpreter: TurtleInterpreter::with_standard_symbols(InterpreterConfig::default()),
            uploaded: 0,
        };

        // The axiom always gets geometry, even when the target count is 0.
        let points = system
            .interpreter
            .interpret(system.grammar.axiom(), system.grammar.angle_degrees)?;
        system.store.append(&points)?;

        while system.generation_count() < system.grammar.target_generations {
            match system.iterate() {
                Ok(_) => {}
                Err(LsysError::CapacityExceeded { needed, max }) => {
                    warn!(
                        needed,
                        max,
                        generations = system.generation_count(),
                        "stopping expansion: geometry exceeds maximum buffer size"
                    );
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            generations = system.generation_count(),
            points = system.store.point_count(),
            "parsed L-System"
        );
        Ok(system)
    }

    /// Rewrites the latest generation, generates its geometry, and appends
    /// both. Returns the new generation's index.
    ///
    /// # Errors
    ///
    /// [`LsysError::CapacityExceeded`] when the new geometry would cross
    /// the store's size ceiling (stored generations and
    /// [`generation_count`](Self::generation_count) are unchanged), or an
    /// interpretation error for a malformed bracket structure.
    pub fn iterate(&mut self) -> Result<usize> {
        let next = rewrite(self.grammar.latest(), &self.grammar.rules);
        let points = self
            .interpreter
            .interpret(&next, self.grammar.angle_degrees)?;
        self.store.append(&points)?;
        self.grammar.push_generation(next);
        Ok(self.generation_count() - 1)
    }

    /// Number of generations expanded so far (axiom included).
    pub fn generation_count(&self) -> usize {
        self.grammar.generations().len()
    }

    /// One generation's symbol string, if it exists.
    pub fn generation(&self, index: usize) -> Option<&str> {
        self.grammar.generations().get(index).map(String::as_str)
    }

    /// The grammar, including every generation string.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The geometry store, including every iteration record.
    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    /// One generation's geometry record, if it exists.
    pub fn record(&self, index: usize) -> Option<&IterationRecord> {
        self.store.record(index)
    }

    /// Draws one generation's line geometry through the render backend.
    ///
    /// Points appended since the last draw are uploaded first, then a
    /// ranged draw is issued with `view_proj * normalizing transform`.
    ///
    /// # Errors
    ///
    /// [`LsysError::GenerationOutOfRange`] for an unknown index, or
    /// whatever the backend reports.
    pub fn draw<B: RenderBackend>(
        &mut self,
        generation: usize,
        view_proj: Mat4,
        ctx: &B::Context,
        backend: &mut B,
    ) -> Result<()> {
        let record = *self
            .store
            .record(generation)
            .ok_or(LsysError::GenerationOutOfRange {
                index: generation,
                count: self.generation_count(),
            })?;

        let points = self.store.points();
        if self.uploaded < points.len() {
            backend.upload_vertices(ctx, self.uploaded, &points[self.uploaded..])?;
            self.uploaded = points.len();
        }

        backend.draw_range(ctx, record.first, record.count, view_proj * record.transform)
    }

    /// Draws the latest generation.
    pub fn draw_latest<B: RenderBackend>(
        &mut self,
        view_proj: Mat4,
        ctx: &B::Context,
        backend: &mut B,
    ) -> Result<()> {
        self.draw(self.generation_count() - 1, view_proj, ctx, backend)
    }
}
