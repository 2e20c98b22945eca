//! Fact extraction.
//!
//! One forward pass over the document with a namespace-aware reader. Only
//! elements bound to the iXBRL namespace are interpreted, whatever prefix
//! the document gives them; everything else is walked through so nested
//! facts are still found.
use super::types::{Continuation, Extraction, Fact, NumericFact, TextFact, TupleDecl};
use crate::ixbrl::error::{IxbrlError, Result};
use crate::ixbrl::format::{parse_numeral, NumberFormat};
use crate::ixbrl::IX_NAMESPACE;
use log::debug;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

/// Extract every fact, tuple declaration and continuation fragment.
pub fn extract_facts(content: &str) -> Result<Extraction> {
    let mut scanner = Scanner::new(content);
    let mut out = Extraction::default();
    loop {
        match scanner.next()? {
            Step::Start { element, ix: true, empty } => scanner.fact(&element, empty, &mut out)?,
            Step::Eof => break,
            _ => {}
        }
    }
    debug!(
        "Extracted {} facts and {} continuations",
        out.facts.len(),
        out.continuations.len()
    );
    Ok(out)
}

/// HTML entities that show up in hand-edited reports. XML only predefines
/// five.
fn html_entity(name: &str) -> Option<&'static str> {
    match name {
        "nbsp" => Some("\u{a0}"),
        "ndash" => Some("\u{2013}"),
        "mdash" => Some("\u{2014}"),
        "shy" => Some("\u{ad}"),
        "auml" => Some("ä"),
        "aring" => Some("å"),
        "ouml" => Some("ö"),
        "Auml" => Some("Ä"),
        "Aring" => Some("Å"),
        "Ouml" => Some("Ö"),
        _ => None,
    }
}

enum Step<'a> {
    Start {
        element: BytesStart<'a>,
        ix: bool,
        /// Self-closing: no body and no matching end event.
        empty: bool,
    },
    Text(String),
    End,
    Eof,
}

struct Attributes(Vec<(String, String)>);

impl Attributes {
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn string(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    fn owned(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }
}

struct Scanner<'a> {
    reader: NsReader<&'a [u8]>,
    /// Names of the elements currently open, outermost first.
    open: Vec<String>,
    position: u64,
}

impl<'a> Scanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            reader: NsReader::from_str(content),
            open: Vec::new(),
            position: 0,
        }
    }

    fn next(&mut self) -> Result<Step<'a>> {
        loop {
            self.position = self.reader.buffer_position() as u64;
            let position = self.position;
            let (ns, event) = self
                .reader
                .read_resolved_event()
                .map_err(|e| IxbrlError::xml(position, e))?;
            let ix = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == IX_NAMESPACE.as_bytes());

            match event {
                Event::Start(element) => {
                    self.open
                        .push(String::from_utf8_lossy(element.name().as_ref()).into_owned());
                    return Ok(Step::Start {
                        element,
                        ix,
                        empty: false,
                    });
                }
                Event::Empty(element) => {
                    return Ok(Step::Start {
                        element,
                        ix,
                        empty: true,
                    })
                }
                Event::End(_) => {
                    self.open.pop();
                    return Ok(Step::End);
                }
                Event::Text(text) => {
                    let text = text
                        .unescape_with(|entity| {
                            resolve_predefined_entity(entity).or_else(|| html_entity(entity))
                        })
                        .map_err(|e| IxbrlError::xml(position, e))?;
                    return Ok(Step::Text(text.into_owned()));
                }
                Event::CData(data) => {
                    return Ok(Step::Text(String::from_utf8_lossy(&data).into_owned()));
                }
                Event::Eof => {
                    return match self.open.last() {
                        Some(element) => Err(IxbrlError::UnexpectedEof {
                            element: element.clone(),
                        }),
                        None => Ok(Step::Eof),
                    };
                }
                _ => {}
            }
        }
    }

    fn attributes(&self, element: &BytesStart<'_>) -> Result<Attributes> {
        let mut out = Vec::new();
        for attr in element.attributes() {
            let attr = attr.map_err(|e| IxbrlError::xml(self.position, e))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| IxbrlError::xml(self.position, e))?
                .into_owned();
            out.push((key, value));
        }
        Ok(Attributes(out))
    }

    /// Decode the iXBRL element just opened.
    fn fact(&mut self, element: &BytesStart<'a>, empty: bool, out: &mut Extraction) -> Result<()> {
        let attrs = self.attributes(element)?;
        match element.local_name().as_ref() {
            b"nonFraction" => {
                let fact = self.numeric(&attrs, empty)?;
                out.facts.push(Fact::Numeric(fact));
            }
            b"nonNumeric" => {
                let mut nested = Extraction::default();
                let text = if empty { String::new() } else { self.body(&mut nested)? };
                out.facts.push(Fact::Text(TextFact {
                    concept: attrs.string("name"),
                    context: attrs.string("contextRef"),
                    text: text.trim().to_string(),
                    id: attrs.owned("id"),
                    continued_at: attrs.owned("continuedAt"),
                    tuple_ref: attrs.owned("tupleRef"),
                    order: attrs.owned("order"),
                }));
                out.append(nested);
            }
            b"continuation" => {
                let mut nested = Extraction::default();
                let text = if empty { String::new() } else { self.body(&mut nested)? };
                out.continuations.push(Continuation {
                    id: attrs.string("id"),
                    text: text.trim().to_string(),
                    continued_at: attrs.owned("continuedAt"),
                });
                out.append(nested);
            }
            b"tuple" => {
                out.facts.push(Fact::Tuple(TupleDecl {
                    concept: attrs.string("name"),
                    tuple_id: attrs.string("tupleID"),
                }));
                if !empty {
                    self.body(out)?;
                }
            }
            // header, hidden, references, resources and the rest
            _ => {
                if !empty {
                    self.body(out)?;
                }
            }
        }
        Ok(())
    }

    /// Read up to the end of the element just opened. Returns the directly
    /// owned text; nested facts go to `out`.
    fn body(&mut self, out: &mut Extraction) -> Result<String> {
        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            match self.next()? {
                Step::Start { element, ix: true, empty } => self.fact(&element, empty, out)?,
                Step::Start { empty: false, .. } => depth += 1,
                Step::Start { .. } => {}
                Step::Text(t) => text.push_str(&t),
                Step::End if depth == 0 => return Ok(text),
                Step::End => depth -= 1,
                Step::Eof => {
                    return Err(IxbrlError::UnexpectedEof {
                        element: "ix".to_string(),
                    })
                }
            }
        }
    }

    fn numeric(&mut self, attrs: &Attributes, empty: bool) -> Result<NumericFact> {
        let concept = attrs.string("name");
        let display = if empty {
            String::new()
        } else {
            self.numeral_text(&concept)?
        };
        let display = display.trim().to_string();

        let scale = match attrs.get("scale") {
            None => 0,
            Some(raw) => raw.trim().parse::<i32>().map_err(|_| IxbrlError::InvalidAttribute {
                element: "ix:nonFraction".to_string(),
                attribute: "scale".to_string(),
                value: raw.to_string(),
            })?,
        };
        let format_code = attrs.owned("format");
        let format = NumberFormat::from_code(format_code.as_deref());
        let negated = attrs.get("sign") == Some("-");
        let context = attrs.string("contextRef");

        let amount = parse_numeral(&display, &format, scale).and_then(|magnitude| {
            if negated {
                magnitude.checked_neg()
            } else {
                Some(magnitude)
            }
        });

        Ok(NumericFact {
            concept,
            context,
            unit: attrs.string("unitRef"),
            scale,
            format: format_code,
            negated,
            display,
            amount,
            tuple_ref: attrs.owned("tupleRef"),
            order: attrs.owned("order"),
        })
    }

    /// Character content of a numeric fact. Plain markup is allowed inside,
    /// another fact is not.
    fn numeral_text(&mut self, concept: &str) -> Result<String> {
        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            match self.next()? {
                Step::Start { element, ix: true, .. } => {
                    return Err(IxbrlError::NestedFact {
                        concept: concept.to_string(),
                        element: String::from_utf8_lossy(element.name().as_ref()).into_owned(),
                    })
                }
                Step::Start { empty: false, .. } => depth += 1,
                Step::Start { .. } => {}
                Step::Text(t) => text.push_str(&t),
                Step::End if depth == 0 => return Ok(text),
                Step::End => depth -= 1,
                Step::Eof => {
                    return Err(IxbrlError::UnexpectedEof {
                        element: "ix:nonFraction".to_string(),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> String {
        format!(
            r#"<html xmlns="http://www.w3.org/1999/xhtml" xmlns:ix="{}"><body>{}</body></html>"#,
            IX_NAMESPACE, body
        )
    }

    fn numeric(fact: &Fact) -> &NumericFact {
        match fact {
            Fact::Numeric(f) => f,
            other => panic!("expected numeric fact, got {:?}", other),
        }
    }

    fn text(fact: &Fact) -> &TextFact {
        match fact {
            Fact::Text(f) => f,
            other => panic!("expected text fact, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_fact() {
        let content = doc(concat!(
            r#"<td><ix:nonFraction contextRef="period0" name="se-gen-base:Nettoomsattning" unitRef="SEK" decimals="INF" scale="3" format="ixt:numspacecomma">2 650</ix:nonFraction></td>"#,
            r#"<td>-<ix:nonFraction contextRef="period0" name="x:Disp" unitRef="SEK" decimals="INF" scale="0" format="ixt:numspacecomma" sign="-">70 000</ix:nonFraction></td>"#,
        ));
        let out = extract_facts(&content).unwrap();
        assert_eq!(out.facts.len(), 2);

        let sales = numeric(&out.facts[0]);
        assert_eq!(sales.concept, "se-gen-base:Nettoomsattning");
        assert_eq!(sales.context, "period0");
        assert_eq!(sales.unit, "SEK");
        assert_eq!(sales.scale, 3);
        assert_eq!(sales.display, "2 650");
        assert_eq!(sales.amount, Some(2_650_000));

        let disp = numeric(&out.facts[1]);
        assert!(disp.negated);
        assert_eq!(disp.amount, Some(-70_000));
    }

    #[test]
    fn test_nested_text_facts() {
        let content = doc(concat!(
            r#"<p><ix:nonNumeric name="x:Outer" contextRef="balans0" continuedAt="c1">"#,
            r#"<ix:nonNumeric name="x:A" contextRef="balans0">Jag intygar</ix:nonNumeric> den "#,
            r#"<ix:nonNumeric name="x:B" contextRef="balans0">2017-03-01</ix:nonNumeric>"#,
            r#"</ix:nonNumeric></p>"#,
            r#"<p><ix:continuation id="c1"><ix:nonNumeric name="x:C" contextRef="balans0">Original</ix:nonNumeric></ix:continuation></p>"#,
        ));
        let out = extract_facts(&content).unwrap();
        let concepts: Vec<_> = out.facts.iter().map(Fact::concept).collect();
        assert_eq!(concepts, vec!["x:Outer", "x:A", "x:B", "x:C"]);

        let outer = text(&out.facts[0]);
        assert_eq!(outer.text, "den");
        assert_eq!(outer.continued_at.as_deref(), Some("c1"));
        assert_eq!(text(&out.facts[1]).text, "Jag intygar");
        assert_eq!(out.continuations.len(), 1);
        assert_eq!(out.continuations[0].id, "c1");
        assert_eq!(out.continuations[0].text, "");
    }

    #[test]
    fn test_tuples_and_transparent_containers() {
        let content = doc(concat!(
            r#"<div style="display:none"><ix:header><ix:hidden>"#,
            r#"<ix:nonNumeric name="se-cd-base:Sprak" contextRef="period0">sv</ix:nonNumeric>"#,
            r#"</ix:hidden></ix:header></div>"#,
            r#"<ix:tuple name="x:Tuple" tupleID="Tuple1" />"#,
            r#"<ix:nonNumeric name="x:Namn" contextRef="period0" tupleRef="Tuple1" order="1.0">Anna</ix:nonNumeric>"#,
        ));
        let out = extract_facts(&content).unwrap();
        assert_eq!(out.facts.len(), 3);
        assert_eq!(text(&out.facts[0]).text, "sv");
        assert_eq!(
            out.facts[1],
            Fact::Tuple(TupleDecl {
                concept: "x:Tuple".to_string(),
                tuple_id: "Tuple1".to_string(),
            })
        );
        let member = text(&out.facts[2]);
        assert_eq!(member.tuple_ref.as_deref(), Some("Tuple1"));
        assert_eq!(member.order.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_prefix_is_irrelevant() {
        let content = format!(
            r#"<html xmlns:inl="{}" xmlns:ix="urn:other"><inl:nonNumeric name="x:A" contextRef="period0">ja</inl:nonNumeric><ix:nonNumeric name="x:B" contextRef="period0">nej</ix:nonNumeric></html>"#,
            IX_NAMESPACE
        );
        let out = extract_facts(&content).unwrap();
        assert_eq!(out.facts.len(), 1);
        assert_eq!(out.facts[0].concept(), "x:A");
    }

    #[test]
    fn test_entities() {
        let content = doc(
            r#"<ix:nonNumeric name="x:A" contextRef="period0">Bröd &amp; Smör&nbsp;AB &#8211; 2016</ix:nonNumeric>"#,
        );
        let out = extract_facts(&content).unwrap();
        assert_eq!(text(&out.facts[0]).text, "Bröd & Smör\u{a0}AB \u{2013} 2016");
    }

    #[test]
    fn test_markup_inside_numeric_fact() {
        let content = doc(
            r#"<ix:nonFraction contextRef="balans0" name="x:A" unitRef="SEK" scale="0"><span>1 500</span></ix:nonFraction>"#,
        );
        let out = extract_facts(&content).unwrap();
        let fact = numeric(&out.facts[0]);
        assert_eq!(fact.amount, Some(1500));
        assert_eq!(fact.format, None);
    }

    #[test]
    fn test_nested_fact_in_numeric() {
        let content = doc(concat!(
            r#"<ix:nonFraction contextRef="period0" name="x:A" unitRef="SEK">1"#,
            r#"<ix:nonNumeric name="x:B" contextRef="period0">b</ix:nonNumeric>"#,
            r#"</ix:nonFraction>"#,
        ));
        match extract_facts(&content) {
            Err(IxbrlError::NestedFact { concept, element }) => {
                assert_eq!(concept, "x:A");
                assert_eq!(element, "ix:nonNumeric");
            }
            other => panic!("expected nested fact error, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_fact() {
        let content = format!(
            r#"<html xmlns:ix="{}"><ix:nonFraction contextRef="period0" name="x:A" unitRef="SEK">1 000"#,
            IX_NAMESPACE
        );
        assert!(matches!(
            extract_facts(&content),
            Err(IxbrlError::UnexpectedEof { .. } | IxbrlError::Xml { .. })
        ));
    }

    #[test]
    fn test_mismatched_end_tag() {
        let content = doc(r#"<p><ix:nonNumeric name="x:A" contextRef="period0">a</p></ix:nonNumeric>"#);
        assert!(matches!(extract_facts(&content), Err(IxbrlError::Xml { .. })));
    }

    #[test]
    fn test_invalid_scale() {
        let content = doc(
            r#"<ix:nonFraction contextRef="period0" name="x:A" unitRef="SEK" scale="three">1</ix:nonFraction>"#,
        );
        match extract_facts(&content) {
            Err(IxbrlError::InvalidAttribute { attribute, value, .. }) => {
                assert_eq!(attribute, "scale");
                assert_eq!(value, "three");
            }
            other => panic!("expected invalid attribute, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_numeral_keeps_display() {
        let content = doc(concat!(
            r#"<ix:nonFraction contextRef="balans0" name="x:Soliditet" unitRef="procent" scale="-2" format="ixt:numcomma">33,7 %</ix:nonFraction>"#,
            r#"<ix:nonFraction contextRef="balans1" name="x:A" unitRef="SEK">12 abc</ix:nonFraction>"#,
        ));
        let extraction = extract_facts(&content).unwrap();
        let facts: Vec<_> = extraction
            .facts
            .iter()
            .filter_map(|f| match f {
                Fact::Numeric(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].display, "33,7 %");
        assert_eq!(facts[0].amount, None);
        assert_eq!(facts[1].context, "balans1");
        assert_eq!(facts[1].display, "12 abc");
        assert_eq!(facts[1].amount, None);
    }
}
