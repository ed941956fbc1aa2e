use super::{JosmDocument, JosmElement};
use std::borrow::Cow;
use std::io::Write;

pub const GENERATOR: &str = "gtfs-osm";

/// writes the document as OSM XML 0.6: nodes, then ways, then relations.
pub fn write_document<W: Write>(document: &JosmDocument, mut out: W) -> std::io::Result<()> {
    writeln!(out, "<?xml version='1.0' encoding='UTF-8'?>")?;
    writeln!(out, "<osm version=\"0.6\" generator=\"{GENERATOR}\">")?;
    for element in document.elements_in_order() {
        write_element(&mut out, element)?;
    }
    writeln!(out, "</osm>")?;
    out.flush()
}

fn write_element<W: Write>(out: &mut W, element: &JosmElement) -> std::io::Result<()> {
    write!(out, "  <{} id=\"{}\"", element.element_type, element.id)?;
    if element.upload {
        write!(out, " action=\"modify\" visible=\"true\"")?;
    }
    for (key, value) in element.attributes.iter() {
        write!(out, " {key}=\"{}\"", escape(value))?;
    }
    if let Some((lat, lon)) = element.position {
        write!(out, " lat=\"{lat:.7}\" lon=\"{lon:.7}\"")?;
    }
    let childless =
        element.node_refs.is_empty() && element.members.is_empty() && element.tags.is_empty();
    if childless {
        return writeln!(out, "/>");
    }
    writeln!(out, ">")?;
    for node in element.node_refs.iter() {
        writeln!(out, "    <nd ref=\"{node}\"/>")?;
    }
    for member in element.members.iter() {
        writeln!(
            out,
            "    <member type=\"{}\" ref=\"{}\" role=\"{}\"/>",
            member.member_type,
            member.reference,
            escape(&member.role)
        )?;
    }
    for (key, value) in element.tags.iter() {
        writeln!(out, "    <tag k=\"{}\" v=\"{}\"/>", escape(key), escape(value))?;
    }
    writeln!(out, "  </{}>", element.element_type)
}

/// escapes a value for use inside a double quoted XML attribute.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'', '\n', '\t']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' => escaped.push_str("&#10;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("Berri-UQAM"), "Berri-UQAM");
        assert_eq!(
            escape("Côte-des-Neiges & \"Queen-Mary\""),
            "Côte-des-Neiges &amp; &quot;Queen-Mary&quot;"
        );
        assert_eq!(escape("<'>"), "&lt;&apos;&gt;");
    }
}
