//! Readings: the structured facts of a cast, ready for an interpreter.
//!
//! The prose itself comes from an outside text-generation service. This
//! module only decides what that service is told.

use bagua_core::{ChangingLines, Focus, Guideline, HexagramCatalog, HexagramNumber};
use serde::Serialize;

use crate::caster::{Cast, CastMode, CastQuality};
use crate::content::{ContentSource, HexagramRecord};

/// What a reading knows about one hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HexagramFacts {
    /// Hexagram number.
    pub number: HexagramNumber,
    /// Content name when available, otherwise the built-in romanized name.
    pub name: String,
    /// Built-in English title.
    pub title: &'static str,
    /// Unicode hexagram glyph.
    pub glyph: char,
    /// Descriptive content, if the source had any.
    pub record: Option<HexagramRecord>,
}

impl HexagramFacts {
    /// Gather facts from the catalog and a content source.
    pub fn gather<C: ContentSource + ?Sized>(
        number: HexagramNumber,
        catalog: &HexagramCatalog,
        content: &C,
    ) -> Self {
        let hexagram = catalog.get(number);
        let record = content.record(number);
        let name = record
            .as_ref()
            .map_or_else(|| hexagram.name.to_string(), |r| r.name.clone());
        Self {
            number,
            name,
            title: hexagram.title,
            glyph: hexagram.symbol(),
            record,
        }
    }

    fn render(&self, role: &str, out: &mut Vec<String>) {
        out.push(format!(
            "{role} hexagram: {} {} {} ({})",
            self.number, self.name, self.glyph, self.title
        ));
        let Some(record) = &self.record else {
            return;
        };
        if let Some(viewpoint) = &record.core_viewpoint {
            out.push(format!("- Core viewpoint: {viewpoint}"));
        }
        if let Some(summary) = &record.summary {
            out.push(format!("- Summary: {summary}"));
        }
        if let Some(models) = &record.mental_models {
            out.push(format!("- Mental models: {models}"));
        }
        if !record.keywords.is_empty() {
            out.push(format!("- Keywords: {}", record.keywords.join(", ")));
        }
    }
}

/// Everything an interpreter needs to know about a cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    /// The present situation.
    pub base: HexagramFacts,
    /// Where it is heading.
    pub result: HexagramFacts,
    /// Positions that changed.
    pub changing: ChangingLines,
    /// Which part of the cast carries the meaning.
    pub guideline: Guideline,
    /// The concrete element to read.
    pub focus: Focus,
    /// How the cast was made.
    pub mode: CastMode,
    /// Whether a fallback was used.
    pub quality: CastQuality,
}

impl Reading {
    /// Assemble a reading for a cast.
    pub fn assemble<C: ContentSource + ?Sized>(
        cast: &Cast,
        catalog: &HexagramCatalog,
        content: &C,
    ) -> Self {
        let guideline = cast.guideline();
        Self {
            base: HexagramFacts::gather(cast.base, catalog, content),
            result: HexagramFacts::gather(cast.result, catalog, content),
            changing: cast.changing,
            guideline,
            focus: guideline.focus(cast.base, cast.result, cast.changing),
            mode: cast.mode,
            quality: cast.quality,
        }
    }

    /// The prompt handed to a text-generation service.
    pub fn prompt(&self) -> String {
        let mut out = Vec::new();
        self.base.render("Base", &mut out);
        out.push(String::new());
        self.result.render("Result", &mut out);
        out.push(String::new());
        out.push(format!("Changing lines: {}", self.changing));
        out.push(format!(
            "Guideline: {} ({})",
            self.guideline,
            self.guideline.description()
        ));
        out.push(format!("Focus: {}", self.focus));
        out.join("\n")
    }
}
