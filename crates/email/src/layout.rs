// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared email layout
//!
//! Templates describe their content as a list of blocks. The same blocks are
//! rendered into the branded HTML shell and into plaintext, so both parts of
//! a message always carry the same information.

use std::fmt::Write;

use crate::EmailConfig;

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Heading(String),
    Paragraph(String),
    Code(String),
    Details(Vec<(String, String)>),
    Button { label: String, url: String },
    Image { src: String, alt: String },
    Note(String),
}

/// Content of one email
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailBody {
    preheader: String,
    blocks: Vec<Block>,
}

impl EmailBody {
    /// Body whose inbox preview shows `preheader`
    pub fn new(preheader: impl Into<String>) -> Self {
        Self {
            preheader: preheader.into(),
            blocks: Vec::new(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading(text.into()));
        self
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    /// Large monospace code, such as a one-time password
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.blocks.push(Block::Code(code.into()));
        self
    }

    /// Label and value table; rows with empty values are dropped
    #[must_use]
    pub fn details<L: Into<String>, V: Into<String>>(mut self, rows: Vec<(L, V)>) -> Self {
        let rows: Vec<(String, String)> = rows
            .into_iter()
            .map(|(l, v)| (l.into(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        if !rows.is_empty() {
            self.blocks.push(Block::Details(rows));
        }
        self
    }

    /// Call-to-action link
    #[must_use]
    pub fn button(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.blocks.push(Block::Button {
            label: label.into(),
            url: url.into(),
        });
        self
    }

    /// Image, left out of the plaintext part
    #[must_use]
    pub fn image(mut self, src: impl Into<String>, alt: impl Into<String>) -> Self {
        self.blocks.push(Block::Image {
            src: src.into(),
            alt: alt.into(),
        });
        self
    }

    /// Small print below the main content
    #[must_use]
    pub fn note(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Note(text.into()));
        self
    }

    /// HTML document with `subject` as title
    pub fn to_html(&self, subject: &str, config: &EmailConfig) -> String {
        let mut content = String::new();
        for block in &self.blocks {
            // Writing into a String cannot fail
            let _ = match block {
                Block::Heading(text) => writeln!(
                    content,
                    r#"<h1 style="font-size:22px;margin:0 0 16px;color:#ffffff">{}</h1>"#,
                    escape_html(text)
                ),
                Block::Paragraph(text) => writeln!(
                    content,
                    r#"<p style="font-size:15px;line-height:24px;margin:0 0 16px;color:#d4d4d8">{}</p>"#,
                    escape_html(text)
                ),
                Block::Code(code) => writeln!(
                    content,
                    r#"<p style="font-family:monospace;font-size:32px;letter-spacing:6px;margin:24px 0;color:#ffffff">{}</p>"#,
                    escape_html(code)
                ),
                Block::Details(rows) => {
                    let mut table = String::from(
                        r#"<table role="presentation" width="100%" style="margin:0 0 16px">"#,
                    );
                    for (label, value) in rows {
                        let _ = write!(
                            table,
                            r#"<tr><td style="color:#a1a1aa;padding:4px 0">{}</td><td style="color:#ffffff;padding:4px 0;text-align:right">{}</td></tr>"#,
                            escape_html(label),
                            escape_html(value)
                        );
                    }
                    writeln!(content, "{table}</table>")
                }
                Block::Button { label, url } => writeln!(
                    content,
                    r#"<p style="margin:24px 0"><a href="{}" style="background:#c6f432;color:#09090b;padding:12px 24px;border-radius:8px;text-decoration:none;font-weight:600">{}</a></p>"#,
                    escape_html(url),
                    escape_html(label)
                ),
                Block::Image { src, alt } => writeln!(
                    content,
                    r#"<img src="{}" alt="{}" width="320" style="display:block;border-radius:12px;margin:0 auto 16px"/>"#,
                    escape_html(src),
                    escape_html(alt)
                ),
                Block::Note(text) => writeln!(
                    content,
                    r#"<p style="font-size:12px;line-height:18px;margin:16px 0 0;color:#71717a">{}</p>"#,
                    escape_html(text)
                ),
            };
        }

        let brand = escape_html(&config.brand_name);
        let support = escape_html(&config.support_email);
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>{title}</title>
</head>
<body style="margin:0;padding:0;background:#09090b;font-family:Helvetica,Arial,sans-serif">
<div style="display:none;max-height:0;overflow:hidden">{preheader}</div>
<table role="presentation" width="100%" cellpadding="0" cellspacing="0">
<tr><td align="center" style="padding:32px 16px">
<table role="presentation" width="560" cellpadding="0" cellspacing="0" style="background:#18181b;border-radius:16px;padding:32px">
<tr><td><a href="{site}"><img src="{logo}" alt="{brand}" height="32"/></a></td></tr>
<tr><td style="padding-top:24px">
{content}</td></tr>
</table>
<p style="font-size:12px;color:#71717a;margin:24px 0 0">{brand} &middot; <a href="mailto:{support}" style="color:#71717a">{support}</a></p>
</td></tr>
</table>
</body>
</html>
"#,
            title = escape_html(subject),
            preheader = escape_html(&self.preheader),
            site = escape_html(config.site_url.as_str()),
            logo = escape_html(&config.asset("logo.png")),
        )
    }

    /// Plaintext alternative
    pub fn to_text(&self, config: &EmailConfig) -> String {
        let mut sections: Vec<String> = Vec::with_capacity(self.blocks.len() + 1);
        for block in &self.blocks {
            match block {
                Block::Heading(text)
                | Block::Paragraph(text)
                | Block::Code(text)
                | Block::Note(text) => {
                    sections.push(text.clone());
                }
                Block::Details(rows) => sections.push(
                    rows.iter()
                        .map(|(label, value)| format!("{label}: {value}"))
                        .collect::<Vec<_>>()
                        .join("\n"),
                ),
                Block::Button { label, url } => sections.push(format!("{label}: {url}")),
                Block::Image { .. } => {}
            }
        }
        sections.push(format!(
            "{} | {}",
            config.brand_name, config.support_email
        ));
        sections.join("\n\n") + "\n"
    }
}
