//! Destinos de exibição para o resultado de um dispatch.

use crate::catalog::Catalog;
use std::io::Write;

/// Texto exibido quando o snippet não produziu nenhuma linha.
pub const NO_OUTPUT: &str = "(no output)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayResult {
    pub target: String,
    pub text: String,
    pub is_failure: bool,
}

impl DisplayResult {
    /// Texto a exibir, com `placeholder` no lugar de uma saída vazia.
    pub fn visible_text<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.text.is_empty() {
            placeholder
        } else {
            &self.text
        }
    }
}

pub trait DisplaySink {
    fn show(&mut self, result: &DisplayResult) -> anyhow::Result<()>;
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn show(&mut self, result: &DisplayResult) -> anyhow::Result<()> {
        (**self).show(result)
    }
}

/// Guarda todos os resultados em ordem de chegada.
#[derive(Debug, Default)]
pub struct MemorySink {
    results: Vec<DisplayResult>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[DisplayResult] {
        &self.results
    }

    pub fn last_for(&self, target: &str) -> Option<&DisplayResult> {
        self.results.iter().rev().find(|r| r.target == target)
    }
}

impl DisplaySink for MemorySink {
    fn show(&mut self, result: &DisplayResult) -> anyhow::Result<()> {
        self.results.push(result.clone());
        Ok(())
    }
}

/// Escreve cada resultado em um `Write` (normalmente stdout).
pub struct TerminalSink<W: Write> {
    out: W,
    placeholder: String,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, placeholder: impl Into<String>) -> Self {
        Self {
            out,
            placeholder: placeholder.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn show(&mut self, result: &DisplayResult) -> anyhow::Result<()> {
        let tag = if result.is_failure { " [erro]" } else { "" };
        writeln!(self.out, "── {}{} ──", result.target, tag)?;
        writeln!(self.out, "{}", result.visible_text(&self.placeholder))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Slot {
    target: String,
    title: String,
    section: String,
    text: Option<String>,
    is_failure: bool,
}

/// Página estática: um slot `<pre>` por entrada do catálogo.
#[derive(Debug)]
pub struct PageSink {
    slots: Vec<Slot>,
    placeholder: String,
}

impl PageSink {
    pub fn from_catalog(catalog: &Catalog, placeholder: impl Into<String>) -> Self {
        let slots = catalog
            .entries()
            .iter()
            .map(|entry| Slot {
                target: crate::dispatch::output_target(&entry.id),
                title: entry.title.clone(),
                section: entry.section.clone(),
                text: None,
                is_failure: false,
            })
            .collect();
        Self {
            slots,
            placeholder: placeholder.into(),
        }
    }

    /// Texto atual de um slot (`None` se nunca preenchido ou inexistente).
    pub fn text_of(&self, target: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.target == target)
            .and_then(|s| s.text.as_deref())
    }

    pub fn render(&self, title: &str) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        html.push_str(concat!(
            "<style>\n",
            ".output { background: #f6f8fa; padding: 0.75em; white-space: pre-wrap; }\n",
            ".output.error { background: #fdecea; color: #b3261e; }\n",
            "</style>\n",
        ));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));

        // Seções na ordem da primeira aparição; entradas na ordem do catálogo.
        let mut sections: Vec<&str> = Vec::new();
        for slot in &self.slots {
            if !sections.contains(&slot.section.as_str()) {
                sections.push(slot.section.as_str());
            }
        }

        for section in sections {
            html.push_str(&format!("<section>\n<h2>{}</h2>\n", escape_html(section)));
            for slot in self.slots.iter().filter(|s| s.section == section) {
                let class = if slot.is_failure { "output error" } else { "output" };
                let text = match slot.text.as_deref() {
                    Some("") | None => self.placeholder.as_str(),
                    Some(text) => text,
                };
                html.push_str(&format!("<h3>{}</h3>\n", escape_html(&slot.title)));
                html.push_str(&format!(
                    "<pre id=\"{}\" class=\"{}\">{}</pre>\n",
                    escape_html(&slot.target),
                    class,
                    escape_html(text)
                ));
            }
            html.push_str("</section>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

impl DisplaySink for PageSink {
    fn show(&mut self, result: &DisplayResult) -> anyhow::Result<()> {
        // Sem slot correspondente: nada a fazer.
        if let Some(slot) = self.slots.iter_mut().find(|s| s.target == result.target) {
            slot.text = Some(result.text.clone());
            slot.is_failure = result.is_failure;
        }
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
