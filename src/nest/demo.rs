//! Grammar demo pipelines
//!
//! The demo takes free-text grammar input and shows three derived views: the
//! normalized grammar, the nested-call structure run through the
//! [reindent printer](crate::nest::formats::reindent), and the LL(1) verdict.
//! Grammar parsing, normalization and the LL(1) check are not done here; they
//! come from a [`GrammarToolkit`] supplied by the caller.
//!
//! Each pipeline runs on its own. A failure is captured as a readable message
//! in that panel and never prevents the other panels from being produced.

pub mod external;

pub use external::ExternalToolkit;

use crate::nest::formats::reindent::format_with;
use crate::nest::options::PrintOptions;
use anyhow::Context;
use std::fmt;

/// Grammar the demo starts with when no input is given.
pub const SAMPLE_GRAMMAR: &str = "<A> ::= a | b | {c};";

/// The external grammar routines the demo pipelines are built from.
pub trait GrammarToolkit {
    /// Opaque parsed grammar, only ever handed back to [`is_ll_one`](Self::is_ll_one).
    type Parsed;

    /// Normalized textual listing of a grammar definition.
    fn format_grammar(&self, text: &str) -> anyhow::Result<String>;

    /// Flat nested-call serialization of a grammar definition.
    fn to_nested_expr(&self, text: &str) -> anyhow::Result<String>;

    fn parse_grammar_structure(&self, text: &str) -> anyhow::Result<Self::Parsed>;

    fn is_ll_one(&self, parsed: &Self::Parsed) -> anyhow::Result<bool>;
}

/// The three output regions of the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Grammar,
    Structure,
    LlOne,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Grammar, Panel::Structure, Panel::LlOne];

    /// Stable identifier of the panel's output region.
    pub fn id(&self) -> &'static str {
        match self {
            Panel::Grammar => "format_output",
            Panel::Structure => "scala_output",
            Panel::LlOne => "LLone_output",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Panel::Grammar => "Normalized grammar",
            Panel::Structure => "Nested structure",
            Panel::LlOne => "LL(1)",
        }
    }
}

/// Result of one pipeline: its text, or the message of the error that stopped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOutput {
    pub panel: Panel,
    pub result: Result<String, String>,
}

impl PanelOutput {
    fn capture(panel: Panel, result: anyhow::Result<String>) -> Self {
        let result = result.map_err(|err| {
            let message = format!("{:#}", err);
            tracing::warn!(panel = panel.id(), error = %message, "demo pipeline failed");
            message
        });
        PanelOutput { panel, result }
    }

    /// Text to display: the output itself or `error: <message>`.
    pub fn text(&self) -> String {
        match &self.result {
            Ok(text) => text.clone(),
            Err(message) => format!("error: {}", message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }
}

/// Outputs of all three pipelines, in [`Panel::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub panels: Vec<PanelOutput>,
}

impl DemoReport {
    pub fn panel(&self, panel: Panel) -> Option<&PanelOutput> {
        self.panels.iter().find(|p| p.panel == panel)
    }

    pub fn has_errors(&self) -> bool {
        self.panels.iter().any(PanelOutput::is_error)
    }
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, output) in self.panels.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "== {} ==", output.panel.title())?;
            writeln!(f, "{}", output.text())?;
        }
        Ok(())
    }
}

/// Run the three demo pipelines over `input`.
pub fn run_demo<T>(toolkit: &T, input: &str, options: &PrintOptions) -> DemoReport
where
    T: GrammarToolkit + ?Sized,
{
    let grammar = PanelOutput::capture(Panel::Grammar, toolkit.format_grammar(input));

    let structure = PanelOutput::capture(
        Panel::Structure,
        toolkit.to_nested_expr(input).and_then(|flat| {
            format_with(&flat, options).context("nested expression could not be formatted")
        }),
    );

    let ll_one = PanelOutput::capture(
        Panel::LlOne,
        toolkit
            .parse_grammar_structure(input)
            .and_then(|parsed| toolkit.is_ll_one(&parsed))
            .map(|verdict| verdict.to_string()),
    );

    DemoReport {
        panels: vec![grammar, structure, ll_one],
    }
}
