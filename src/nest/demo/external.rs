//! Grammar toolkit backed by external commands
//!
//! Each collaborator is an argv list. The grammar text goes to the command's
//! stdin and its stdout, minus trailing line breaks, is the result. A command
//! that is not configured, cannot be started, or exits unsuccessfully fails
//! only the pipeline that needed it.

use super::GrammarToolkit;
use anyhow::{anyhow, bail, Context};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalToolkit {
    pub normalizer: Vec<String>,
    pub serializer: Vec<String>,
    /// When empty, the LL(1) checker receives the grammar text unchanged.
    pub structure_parser: Vec<String>,
    pub ll1_checker: Vec<String>,
}

impl ExternalToolkit {
    pub fn new() -> Self {
        Self::default()
    }
}

fn run_command(role: &str, argv: &[String], input: &str) -> anyhow::Result<String> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("no {} command configured", role))?;

    tracing::debug!(role, program = %program, "running collaborator command");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start {} command '{}'", role, program))?;

    let mut stdin = child
        .stdin
        .take()
        .with_context(|| format!("{} command '{}' has no stdin", role, program))?;
    let bytes = input.as_bytes().to_vec();
    // Written from a separate thread so a chatty child can't block on a full stdout pipe
    let writer = thread::spawn(move || match stdin.write_all(&bytes) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    });

    let output = child
        .wait_with_output()
        .with_context(|| format!("failed to wait for {} command '{}'", role, program))?;

    match writer.join() {
        Ok(result) => result
            .with_context(|| format!("failed to write input to {} command '{}'", role, program))?,
        Err(_) => bail!("input writer for {} command '{}' panicked", role, program),
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{} command '{}' failed ({}): {}",
            role,
            program,
            output.status,
            stderr.trim()
        );
    }

    let stdout = String::from_utf8(output.stdout)
        .with_context(|| format!("{} command '{}' printed non-UTF-8 output", role, program))?;
    Ok(stdout.trim_end_matches(['\n', '\r']).to_string())
}

impl GrammarToolkit for ExternalToolkit {
    type Parsed = String;

    fn format_grammar(&self, text: &str) -> anyhow::Result<String> {
        run_command("normalizer", &self.normalizer, text)
    }

    fn to_nested_expr(&self, text: &str) -> anyhow::Result<String> {
        run_command("serializer", &self.serializer, text)
    }

    fn parse_grammar_structure(&self, text: &str) -> anyhow::Result<String> {
        if self.structure_parser.is_empty() {
            return Ok(text.to_string());
        }
        run_command("structure parser", &self.structure_parser, text)
    }

    fn is_ll_one(&self, parsed: &String) -> anyhow::Result<bool> {
        let verdict = run_command("LL(1) checker", &self.ll1_checker, parsed)?;
        match verdict.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => bail!(
                "LL(1) checker printed {:?}, expected 'true' or 'false'",
                verdict.trim()
            ),
        }
    }
}
