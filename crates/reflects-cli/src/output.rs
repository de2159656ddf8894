//! Listing output for query results.
//!
//! Text output goes through `termcolor` and respects `NO_COLOR` and the
//! `--color` flag. With `--json` every listing is a JSON array instead.

use std::collections::BTreeMap;
use std::io::Write;

use reflects_core::{
    AnnotationRef, AnnotationSequence, MemberKind, MemberRef, MemberSequence, TypeKind, TypeRef,
    TypeSequence, Visibility,
};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Resolve `ColorChoice` from CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: Option<&str>) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match flag {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TypeRow<'r> {
    pub name: &'r str,
    pub kind: TypeKind,
}

impl<'r> From<&TypeRef<'r>> for TypeRow<'r> {
    fn from(ty: &TypeRef<'r>) -> Self {
        Self {
            name: ty.name(),
            kind: ty.kind(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MemberRow<'r> {
    pub name: &'r str,
    pub kind: &'static str,
    pub declaring_type: &'r str,
    pub visibility: Visibility,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub signature: String,
}

impl<'r> From<&MemberRef<'r>> for MemberRow<'r> {
    fn from(member: &MemberRef<'r>) -> Self {
        Self {
            name: member.name(),
            kind: match member.kind() {
                MemberKind::Method => "method",
                MemberKind::Field => "field",
            },
            declaring_type: member.declaring_type().name(),
            visibility: member.modifiers().visibility,
            is_static: member.is_static(),
            signature: member.to_string(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AnnotationRow<'r> {
    #[serde(rename = "type")]
    pub annotation_type: &'r str,
    pub values: &'r BTreeMap<String, String>,
}

impl<'r> From<&AnnotationRef<'r>> for AnnotationRow<'r> {
    fn from(annotation: &AnnotationRef<'r>) -> Self {
        Self {
            annotation_type: annotation.annotation_type().name(),
            values: annotation.values(),
        }
    }
}

/// Writes query results to stdout
pub struct Printer {
    stdout: StandardStream,
    json: bool,
}

impl Printer {
    pub fn new(choice: ColorChoice, json: bool) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
            json,
        }
    }

    pub fn types(&mut self, title: &str, types: &TypeSequence<'_>) -> anyhow::Result<()> {
        if self.json {
            let rows: Vec<TypeRow<'_>> = types.iter().map(TypeRow::from).collect();
            return self.write_json(&rows);
        }

        self.header(title)?;
        for ty in types {
            self.styled(&format!("  {:<10} ", kind_label(ty.kind())), Some(kind_color(ty.kind())))?;
            writeln!(self.stdout, "{}", ty)?;
        }
        self.footer(types.len(), "type")
    }

    pub fn members(&mut self, title: &str, members: &MemberSequence<'_>) -> anyhow::Result<()> {
        if self.json {
            let rows: Vec<MemberRow<'_>> = members.iter().map(MemberRow::from).collect();
            return self.write_json(&rows);
        }

        self.header(title)?;
        for member in members {
            writeln!(self.stdout, "  {}", member)?;
        }
        self.footer(members.len(), "member")
    }

    pub fn annotations(&mut self, title: &str, annotations: &AnnotationSequence<'_>) -> anyhow::Result<()> {
        if self.json {
            let rows: Vec<AnnotationRow<'_>> = annotations.iter().map(AnnotationRow::from).collect();
            return self.write_json(&rows);
        }

        self.header(title)?;
        for annotation in annotations {
            self.styled(&format!("  {}", annotation), Some(Color::Yellow))?;
            writeln!(self.stdout)?;
        }
        self.footer(annotations.len(), "annotation")
    }

    fn write_json<T: Serialize>(&mut self, rows: &[T]) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.stdout, rows)?;
        writeln!(self.stdout)?;
        Ok(())
    }

    fn header(&mut self, title: &str) -> anyhow::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        self.stdout.set_color(&spec)?;
        writeln!(self.stdout, "{}", title)?;
        self.stdout.reset()?;
        Ok(())
    }

    fn footer(&mut self, count: usize, noun: &str) -> anyhow::Result<()> {
        let plural = if count == 1 { "" } else { "s" };
        self.styled(&format!("{} {}{}", count, noun, plural), Some(Color::White))?;
        writeln!(self.stdout)?;
        Ok(())
    }

    fn styled(&mut self, text: &str, color: Option<Color>) -> anyhow::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(color);
        self.stdout.set_color(&spec)?;
        write!(self.stdout, "{}", text)?;
        self.stdout.reset()?;
        Ok(())
    }
}

fn kind_label(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Class => "class",
        TypeKind::Interface => "interface",
        TypeKind::Annotation => "annotation",
        TypeKind::Primitive => "primitive",
    }
}

fn kind_color(kind: TypeKind) -> Color {
    match kind {
        TypeKind::Class => Color::Cyan,
        TypeKind::Interface => Color::Green,
        TypeKind::Annotation => Color::Yellow,
        TypeKind::Primitive => Color::Magenta,
    }
}
