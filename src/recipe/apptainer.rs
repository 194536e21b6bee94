//! Dockerfile → Apptainer definition conversion.
//!
//! The builder only depends on the `RecipeConverter` seam; the shipped
//! implementation parses the Dockerfile into an intermediate instruction list
//! and renders the equivalent definition-file sections:
//!
//! ```text
//! FROM        → Bootstrap/From header
//! COPY / ADD  → %files
//! RUN         → %post
//! WORKDIR     → %post (mkdir + cd)
//! ENV         → %environment
//! ENTRYPOINT  → %runscript
//! LABEL       → %labels
//! ```

use crate::core::error::{Error, Result};

/// Converts a primary (Dockerfile) recipe into a secondary format.
pub trait RecipeConverter {
    fn convert(&self, dockerfile: &str) -> Result<String>;
}

/// The built-in Dockerfile→Apptainer converter.
#[derive(Debug, Default)]
pub struct ApptainerConverter;

/// Intermediate representation of one Dockerfile instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Instruction {
    From(String),
    Run(String),
    Env(String),
    Workdir(String),
    Copy { sources: String, dest: String },
    Entrypoint(Vec<String>),
    Label(String),
}

impl RecipeConverter for ApptainerConverter {
    fn convert(&self, dockerfile: &str) -> Result<String> {
        let instructions = parse(dockerfile)?;
        Ok(render(&instructions))
    }
}

/// Join backslash-continued lines into logical lines.
fn logical_lines(dockerfile: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = String::new();
    for line in dockerfile.lines() {
        let line = line.trim_end();
        let fragment = if pending.is_empty() {
            line
        } else {
            line.trim_start()
        };
        if let Some(head) = fragment.strip_suffix('\\') {
            pending.push_str(head.trim_end());
            pending.push(' ');
            continue;
        }
        pending.push_str(fragment);
        lines.push(std::mem::take(&mut pending));
    }
    if !pending.is_empty() {
        lines.push(pending);
    }
    lines
}

fn parse(dockerfile: &str) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::new();
    for line in logical_lines(dockerfile) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match word {
            "FROM" => {
                // Skip flags like --platform; the image is the first plain token.
                let image = rest
                    .split_whitespace()
                    .find(|token| !token.starts_with("--"))
                    .ok_or_else(|| Error::RecipeConversion {
                        detail: "FROM without an image".to_string(),
                    })?;
                instructions.push(Instruction::From(image.to_string()));
            }
            "RUN" => instructions.push(Instruction::Run(rest.to_string())),
            "ENV" => instructions.push(Instruction::Env(normalize_env(rest))),
            "WORKDIR" => instructions.push(Instruction::Workdir(rest.to_string())),
            "COPY" | "ADD" => {
                let tokens: Vec<&str> = rest
                    .split_whitespace()
                    .filter(|token| !token.starts_with("--"))
                    .collect();
                if tokens.len() < 2 {
                    return Err(Error::RecipeConversion {
                        detail: format!("{word} needs a source and a destination: '{line}'"),
                    });
                }
                instructions.push(Instruction::Copy {
                    sources: tokens[..tokens.len() - 1].join(" "),
                    dest: tokens[tokens.len() - 1].to_string(),
                });
            }
            "ENTRYPOINT" | "CMD" => {
                instructions.push(Instruction::Entrypoint(parse_exec_form(rest)));
            }
            "LABEL" => instructions.push(Instruction::Label(rest.to_string())),
            // No definition-file counterpart; dropped from the conversion.
            "EXPOSE" | "SHELL" | "USER" | "ARG" | "VOLUME" | "STOPSIGNAL" | "HEALTHCHECK"
            | "ONBUILD" | "MAINTAINER" => {}
            other => {
                return Err(Error::RecipeConversion {
                    detail: format!("unrecognized instruction '{other}'"),
                });
            }
        }
    }
    Ok(instructions)
}

/// `ENV KEY=VALUE` stays as-is; legacy `ENV KEY VALUE` becomes `KEY=VALUE`.
fn normalize_env(rest: &str) -> String {
    if let Some((key, value)) = rest.split_once(char::is_whitespace) {
        if !key.contains('=') {
            return format!("{}={}", key, value.trim());
        }
    }
    rest.to_string()
}

/// Exec form `["a", "b"]` or shell form `a b`, both to an argv list.
fn parse_exec_form(rest: &str) -> Vec<String> {
    let rest = rest.trim();
    if let Some(body) = rest.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        body.split(',')
            .map(|token| token.trim().trim_matches('"').to_string())
            .filter(|token| !token.is_empty())
            .collect()
    } else {
        rest.split_whitespace().map(str::to_string).collect()
    }
}

fn render(instructions: &[Instruction]) -> String {
    let image = instructions.iter().find_map(|i| match i {
        Instruction::From(image) => Some(image.as_str()),
        _ => None,
    });

    let mut files = Vec::new();
    let mut post = Vec::new();
    let mut environment = Vec::new();
    let mut labels = Vec::new();
    let mut runscript: Option<&Vec<String>> = None;

    for instruction in instructions {
        match instruction {
            Instruction::From(_) => {}
            Instruction::Run(cmd) => post.push(cmd.clone()),
            Instruction::Workdir(dir) => {
                post.push(format!("mkdir -p {dir}"));
                post.push(format!("cd {dir}"));
            }
            Instruction::Env(assignment) => {
                environment.push(format!("export {assignment}"));
                // %environment only applies at runtime; repeat for %post so
                // later build steps see the variable too.
                post.push(format!("export {assignment}"));
            }
            Instruction::Copy { sources, dest } => files.push(format!("{sources} {dest}")),
            Instruction::Entrypoint(argv) => runscript = Some(argv),
            Instruction::Label(label) => labels.push(label.clone()),
        }
    }

    let mut sections = Vec::new();
    sections.push(format!(
        "Bootstrap: docker\nFrom: {}",
        image.unwrap_or("scratch")
    ));
    if !files.is_empty() {
        sections.push(section("%files", &files));
    }
    if !post.is_empty() {
        sections.push(section("%post", &post));
    }
    if !environment.is_empty() {
        sections.push(section("%environment", &environment));
    }
    if let Some(argv) = runscript {
        let line = format!("exec {} \"$@\"", argv.join(" "));
        sections.push(section("%runscript", &[line]));
    }
    if !labels.is_empty() {
        sections.push(section("%labels", &labels));
    }

    let mut definition = sections.join("\n\n");
    definition.push('\n');
    definition
}

fn section(header: &str, lines: &[String]) -> String {
    let body: Vec<String> = lines.iter().map(|line| format!("    {line}")).collect();
    format!("{header}\n{}", body.join("\n"))
}
