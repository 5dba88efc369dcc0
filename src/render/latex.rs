//! IEEEtran conference template.
//!
//! Text fields are inserted verbatim: authors write LaTeX markup directly.

use crate::paper::numbering::ordinal;
use crate::paper::{Author, PaperDocument, Section};

const PREAMBLE: &str = r"\documentclass[conference]{IEEEtran}
\IEEEoverridecommandlockouts
\usepackage{cite}
\usepackage{amsmath,amssymb,amsfonts}
\usepackage{algorithmic}
\usepackage{graphicx}
\usepackage{textcomp}
\usepackage{xcolor}
\def\BibTeX{{\rm B\kern-.05em{\sc i\kern-.025em b}\kern-.08em
    T\kern-.1667em\lower.7ex\hbox{E}\kern-.125emX}}
";

const SUBTITLE_NOTE: &str = r"{\footnotesize \textsuperscript{*}Note: Sub-titles are not captured for https://ieeexplore.ieee.org and should not be used}";

/// Render the complete `.tex` source for `document`.
pub fn build_latex_document(document: &PaperDocument) -> String {
    let mut tex = String::from(PREAMBLE);
    tex.push_str("\\begin{document}\n\n");

    tex.push_str(&format!("\\title{{{}}}\n\n", title_block(document)));
    tex.push_str(&format!("\\author{{{}}}\n\n", author_blocks(&document.authors)));

    if !document.paper_notice.trim().is_empty() {
        tex.push_str(&format!(
            "\\IEEEspecialpapernotice{{{}}}\n\n",
            document.paper_notice.trim()
        ));
    }

    tex.push_str("\\maketitle\n\n");

    tex.push_str(&format!(
        "\\begin{{abstract}}\n{}\n\\end{{abstract}}\n\n",
        document.abstract_text
    ));
    tex.push_str(&format!(
        "\\begin{{IEEEkeywords}}\n{}\n\\end{{IEEEkeywords}}\n\n",
        document.keywords
    ));

    let sections = document
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| section_block(section, 0, i == 0 && document.drop_cap_enabled))
        .collect::<Vec<_>>()
        .join("\n\n");
    tex.push_str(&sections);
    tex.push_str("\n\n");

    tex.push_str(&format!(
        "\\begin{{thebibliography}}{{00}}\n{}\n\\end{{thebibliography}}\n\n",
        document.references
    ));
    tex.push_str("\\end{document}\n");
    tex
}

fn title_block(document: &PaperDocument) -> String {
    let mut title = format!("{}*\\\\\n{}", document.title.trim(), SUBTITLE_NOTE);
    if !document.funding.trim().is_empty() {
        title.push_str(&format!("\n\\thanks{{{}}}", document.funding.trim()));
    }
    title
}

fn author_blocks(authors: &[Author]) -> String {
    authors
        .iter()
        .enumerate()
        .map(|(i, author)| {
            let mut name = format!(
                "{} {} {}",
                ordinal_markup(i + 1),
                author.first_name.trim(),
                author.last_name.trim()
            );
            if !author.membership.trim().is_empty() {
                name.push_str(&format!(", \\textit{{{}}}", author.membership.trim()));
            }
            format!(
                "\\IEEEauthorblockN{{{}}}\n\\IEEEauthorblockA{{\\textit{{{}}} \\\\\n\\textit{{{}}}\\\\\n{} \\\\\n{}}}",
                name,
                author.department.trim(),
                author.organization.trim(),
                author.city_country.trim(),
                author.email.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\\and\n")
}

/// "1\textsuperscript{st}"
fn ordinal_markup(n: usize) -> String {
    let full = ordinal(n);
    let (number, suffix) = full.split_at(full.len() - 2);
    format!("{}\\textsuperscript{{{}}}", number, suffix)
}

fn section_block(section: &Section, depth: usize, drop_cap: bool) -> String {
    let command = match depth {
        0 => "section",
        1 => "subsection",
        _ => "subsubsection",
    };

    let content = if drop_cap {
        with_drop_cap(&section.content)
    } else {
        section.content.clone()
    };

    let mut block = format!("\\{}{{{}}}\n{}", command, section.title, content);
    for subsection in &section.subsections {
        block.push_str("\n\n");
        block.push_str(&section_block(subsection, depth + 1, false));
    }
    block
}

/// Wrap the opening word in `\IEEEPARstart{F}{irst}`.
///
/// Content that does not start with an alphabetic word of at least two
/// letters is returned unchanged.
fn with_drop_cap(content: &str) -> String {
    let body = content.trim_start();
    let word_len = body
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    let word = &body[..word_len];

    let mut chars = word.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return content.to_string(),
    };
    let rest = chars.as_str();
    if rest.is_empty() {
        return content.to_string();
    }

    format!(
        "\\IEEEPARstart{{{}}}{{{}}}{}",
        first.to_uppercase(),
        rest.to_uppercase(),
        &body[word_len..]
    )
}
