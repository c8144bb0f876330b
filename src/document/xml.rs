//! DITA serialization and fragment well-formedness checks.
use super::{Document, DocumentBody, Narrative};
use anyhow::{anyhow, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

const XML_DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8'?>";
const INDENT: &str = "  ";

/// Render a document with a doctype pointing at `dtd_path` one level up,
/// since topics live in a sibling of the DTD tree.
pub(super) fn render(document: &Document, dtd_path: &str) -> String {
    let root = document.kind.root_element();
    let mut out = String::new();
    push_line(&mut out, 0, XML_DECLARATION);
    push_line(
        &mut out,
        0,
        &format!(
            "<!DOCTYPE {root} PUBLIC \"{}\" \"../{}\">",
            document.kind.public_id(),
            dtd_path.replace('\\', "/")
        ),
    );
    push_line(
        &mut out,
        0,
        &format!("<{root} id=\"{}\">", escape_attr(&document.id)),
    );
    push_line(
        &mut out,
        1,
        &format!("<title>{}</title>", escape_text(&document.title)),
    );

    match &document.body {
        DocumentBody::Properties(properties) => {
            push_line(&mut out, 1, "<refbody>");
            push_line(&mut out, 2, "<properties>");
            for property in properties {
                push_line(&mut out, 3, "<property>");
                push_line(
                    &mut out,
                    4,
                    &format!("<proptype>{}</proptype>", escape_text(&property.name)),
                );
                push_line(
                    &mut out,
                    4,
                    &format!("<propvalue>{}</propvalue>", escape_text(&property.value)),
                );
                push_line(&mut out, 3, "</property>");
            }
            push_line(&mut out, 2, "</properties>");
            push_line(&mut out, 1, "</refbody>");
        }
        DocumentBody::Narrative(narrative) => {
            push_line(&mut out, 1, "<conbody>");
            match narrative {
                Narrative::Markup(markup) => push_line(&mut out, 2, markup),
                Narrative::Text(text) => {
                    push_line(&mut out, 2, &format!("<p>{}</p>", escape_text(text)))
                }
            }
            push_line(&mut out, 1, "</conbody>");
        }
    }

    push_line(&mut out, 0, &format!("</{root}>"));
    out
}

/// Check that `fragment` is exactly one well-formed `<p>` element.
pub(super) fn check_paragraph(fragment: &str) -> Result<()> {
    let mut reader = Reader::from_str(fragment);
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if depth == 0 {
                    roots += 1;
                    expect_paragraph(start.name().as_ref())?;
                }
                for attr in start.attributes() {
                    attr?;
                }
                depth += 1;
            }
            Event::Empty(empty) => {
                if depth == 0 {
                    roots += 1;
                    expect_paragraph(empty.name().as_ref())?;
                }
                for attr in empty.attributes() {
                    attr?;
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| anyhow!("closing tag without opening tag"))?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if depth == 0 && !text.trim().is_empty() {
                    return Err(anyhow!("text outside the enclosing paragraph"));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(anyhow!("CDATA outside the enclosing paragraph"));
            }
            Event::Decl(_) | Event::DocType(_) => {
                return Err(anyhow!("unexpected declaration in paragraph fragment"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(anyhow!("unclosed element in paragraph fragment"));
    }
    if roots != 1 {
        return Err(anyhow!("expected a single <p> element, found {roots}"));
    }
    Ok(())
}

fn expect_paragraph(name: &[u8]) -> Result<()> {
    if name != b"p" {
        return Err(anyhow!(
            "expected <p> as enclosing element, found <{}>",
            String::from_utf8_lossy(name)
        ));
    }
    Ok(())
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
