//! Fact tagging.
//!
//! [`FactWriter`] wraps the output sink and writes tagged facts next to the
//! plain markup around them. The first failed write poisons the writer:
//! that call returns [`IxbrlError::Write`] and every later call returns
//! [`IxbrlError::SinkFailed`] without touching the sink again.
use super::context::{ContextRef, Unit};
use super::error::{IxbrlError, Result};
use super::format::{display_amount, NumberFormat};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;
use std::io::Write;

/// Membership of a fact in an `ix:tuple` group.
#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
    pub tuple_ref: &'a str,
    /// Rendered as `1.0`, `2.0`, ...
    pub order: u32,
}

#[derive(Debug, Clone)]
enum Numeral<'a> {
    Amount(i64),
    /// Already formatted for display, written as is.
    Display(&'a str),
}

/// An `ix:nonFraction` waiting to be written.
#[derive(Debug, Clone)]
pub struct NonFraction<'a> {
    concept: &'a str,
    context: ContextRef,
    unit: Unit,
    numeral: Numeral<'a>,
    scale: i32,
    format: NumberFormat,
    invert_sign: bool,
    neg_prefix: bool,
    wrap: Option<&'a str>,
    member: Option<Member<'a>>,
}

impl<'a> NonFraction<'a> {
    pub fn new(concept: &'a str, context: ContextRef, unit: Unit, amount: i64) -> Self {
        Self::with_numeral(concept, context, unit, Numeral::Amount(amount))
    }

    /// A fact whose displayed numeral is supplied by the caller.
    pub fn preformatted(concept: &'a str, context: ContextRef, unit: Unit, display: &'a str) -> Self {
        Self::with_numeral(concept, context, unit, Numeral::Display(display))
    }

    fn with_numeral(concept: &'a str, context: ContextRef, unit: Unit, numeral: Numeral<'a>) -> Self {
        Self {
            concept,
            context,
            unit,
            numeral,
            scale: 0,
            format: NumberFormat::SpaceComma,
            invert_sign: false,
            neg_prefix: false,
            wrap: None,
            member: None,
        }
    }

    pub fn scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    pub fn format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// The canonical amount is the negation of what is displayed.
    pub fn invert_sign(mut self) -> Self {
        self.invert_sign = true;
        self
    }

    /// Write a `-` in front of the tag. Display only; the fact is unchanged.
    pub fn neg_prefix(mut self) -> Self {
        self.neg_prefix = true;
        self
    }

    pub fn wrap(mut self, class: &'a str) -> Self {
        self.wrap = Some(class);
        self
    }

    pub fn member(mut self, tuple_ref: &'a str, order: u32) -> Self {
        self.member = Some(Member { tuple_ref, order });
        self
    }

    fn sign_flag(&self) -> bool {
        let negative = matches!(self.numeral, Numeral::Amount(a) if a < 0);
        negative != self.invert_sign
    }

    fn render(&self) -> String {
        let display = match &self.numeral {
            Numeral::Amount(amount) => display_amount(*amount, self.scale, &self.format),
            Numeral::Display(display) => display.to_string(),
        };

        let mut tag = String::with_capacity(160);
        if let Some(class) = self.wrap {
            let _ = write!(tag, r#"<span class="{}">"#, encode_double_quoted_attribute(class));
        }
        if self.neg_prefix {
            tag.push('-');
        }
        let _ = write!(
            tag,
            r#"<ix:nonFraction contextRef="{}" name="{}" unitRef="{}" decimals="INF" scale="{}""#,
            self.context,
            encode_double_quoted_attribute(self.concept),
            self.unit.id(),
            self.scale
        );
        if let Some(code) = self.format.code() {
            let _ = write!(tag, r#" format="{}""#, encode_double_quoted_attribute(code));
        }
        if self.sign_flag() {
            tag.push_str(r#" sign="-""#);
        }
        if let Some(member) = &self.member {
            write_member(&mut tag, member);
        }
        let _ = write!(tag, ">{}</ix:nonFraction>", encode_text(&display));
        if self.wrap.is_some() {
            tag.push_str("</span>");
        }
        tag
    }
}

/// An `ix:nonNumeric` waiting to be written.
#[derive(Debug, Clone)]
pub struct NonNumeric<'a> {
    concept: &'a str,
    context: ContextRef,
    id: Option<&'a str>,
    continued_at: Option<&'a str>,
    member: Option<Member<'a>>,
}

impl<'a> NonNumeric<'a> {
    pub fn new(concept: &'a str, context: ContextRef) -> Self {
        Self {
            concept,
            context,
            id: None,
            continued_at: None,
            member: None,
        }
    }

    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    pub fn continued_at(mut self, id: &'a str) -> Self {
        self.continued_at = Some(id);
        self
    }

    pub fn member(mut self, tuple_ref: &'a str, order: u32) -> Self {
        self.member = Some(Member { tuple_ref, order });
        self
    }

    fn open_tag(&self) -> String {
        let mut tag = String::with_capacity(96);
        let _ = write!(
            tag,
            r#"<ix:nonNumeric name="{}" contextRef="{}""#,
            encode_double_quoted_attribute(self.concept),
            self.context
        );
        if let Some(id) = self.id {
            let _ = write!(tag, r#" id="{}""#, encode_double_quoted_attribute(id));
        }
        if let Some(next) = self.continued_at {
            let _ = write!(tag, r#" continuedAt="{}""#, encode_double_quoted_attribute(next));
        }
        if let Some(member) = &self.member {
            write_member(&mut tag, member);
        }
        tag.push('>');
        tag
    }
}

fn write_member(tag: &mut String, member: &Member<'_>) {
    let _ = write!(
        tag,
        r#" tupleRef="{}" order="{}.0""#,
        encode_double_quoted_attribute(member.tuple_ref),
        member.order
    );
}

/// The tail of a split text fact, to be written where the caller wants it.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingContinuation {
    pub id: String,
    pub text: String,
}

impl PendingContinuation {
    pub fn emit<W: Write>(self, w: &mut FactWriter<W>) -> Result<()> {
        w.open_continuation(&self.id)?;
        w.text(&self.text)?;
        w.close_continuation()
    }
}

/// Group ids `<LocalName>1..=count` for `count` members of a tuple concept.
pub fn tuple_ids(concept: &str, count: usize) -> Vec<String> {
    let local = super::concepts::local_name(concept);
    (1..=count).map(|i| format!("{}{}", local, i)).collect()
}

pub struct FactWriter<W: Write> {
    sink: W,
    poisoned: bool,
    indent: usize,
}

impl<W: Write> FactWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            poisoned: false,
            indent: 0,
        }
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Write markup exactly as given.
    pub fn raw(&mut self, markup: &str) -> Result<()> {
        if self.poisoned {
            return Err(IxbrlError::SinkFailed);
        }
        self.sink.write_all(markup.as_bytes()).map_err(|e| {
            self.poisoned = true;
            IxbrlError::Write(e)
        })
    }

    /// Write character data, escaped.
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.raw(&encode_text(text))
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn outdent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Start a new indented line.
    pub fn begin_line(&mut self) -> Result<()> {
        let pad = "\t".repeat(self.indent);
        self.raw(&pad)
    }

    pub fn end_line(&mut self) -> Result<()> {
        self.raw("\n")
    }

    /// One indented line of markup.
    pub fn line(&mut self, markup: &str) -> Result<()> {
        self.begin_line()?;
        self.raw(markup)?;
        self.end_line()
    }

    /// `<tag>text</tag>` on its own line, with `text` escaped.
    pub fn element(&mut self, tag: &str, text: &str) -> Result<()> {
        self.begin_line()?;
        self.raw(&format!("<{}>{}</{}>", tag, encode_text(text), tag))?;
        self.end_line()
    }

    pub fn non_fraction(&mut self, fact: &NonFraction<'_>) -> Result<()> {
        self.raw(&fact.render())
    }

    pub fn non_numeric(&mut self, fact: &NonNumeric<'_>, text: &str) -> Result<()> {
        self.open_non_numeric(fact)?;
        self.text(text)?;
        self.close_non_numeric()
    }

    /// Like [`non_numeric`](Self::non_numeric) but `markup` is trusted XHTML.
    pub fn non_numeric_raw(&mut self, fact: &NonNumeric<'_>, markup: &str) -> Result<()> {
        self.open_non_numeric(fact)?;
        self.raw(markup)?;
        self.close_non_numeric()
    }

    /// Open a text fact so other facts can be nested inside it.
    pub fn open_non_numeric(&mut self, fact: &NonNumeric<'_>) -> Result<()> {
        self.raw(&fact.open_tag())
    }

    pub fn close_non_numeric(&mut self) -> Result<()> {
        self.raw("</ix:nonNumeric>")
    }

    /// Write `head` as a text fact continued at `id` and hand back the tail.
    pub fn split_non_numeric(
        &mut self,
        fact: &NonNumeric<'_>,
        head: &str,
        tail: &str,
        id: &str,
    ) -> Result<PendingContinuation> {
        let fact = fact.clone().continued_at(id);
        self.non_numeric(&fact, head)?;
        Ok(PendingContinuation {
            id: id.to_string(),
            text: tail.to_string(),
        })
    }

    pub fn open_continuation(&mut self, id: &str) -> Result<()> {
        self.raw(&format!(
            r#"<ix:continuation id="{}">"#,
            encode_double_quoted_attribute(id)
        ))
    }

    pub fn close_continuation(&mut self) -> Result<()> {
        self.raw("</ix:continuation>")
    }

    /// Declare a tuple group. Members refer to it by `tuple_id`.
    pub fn tuple(&mut self, concept: &str, tuple_id: &str) -> Result<()> {
        self.line(&format!(
            r#"<ix:tuple name="{}" tupleID="{}" />"#,
            encode_double_quoted_attribute(concept),
            encode_double_quoted_attribute(tuple_id)
        ))
    }

    pub fn flush(&mut self) -> Result<()> {
        if self.poisoned {
            return Err(IxbrlError::SinkFailed);
        }
        self.sink.flush().map_err(|e| {
            self.poisoned = true;
            IxbrlError::Write(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut FactWriter<&mut Vec<u8>>) -> Result<()>,
    {
        let mut buf = Vec::new();
        let mut w = FactWriter::new(&mut buf);
        f(&mut w).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_default_numeric_fact() {
        let out = render(|w| {
            w.non_fraction(&NonFraction::new(
                "se-gen-base:Nettoomsattning",
                ContextRef::PERIOD0,
                Unit::Sek,
                2_650_000,
            ))
        });
        assert_eq!(
            out,
            r#"<ix:nonFraction contextRef="period0" name="se-gen-base:Nettoomsattning" unitRef="SEK" decimals="INF" scale="0" format="ixt:numspacecomma">2 650 000</ix:nonFraction>"#
        );
    }

    #[test]
    fn test_sign_flag() {
        let inverted = NonFraction::new("x:A", ContextRef::PERIOD0, Unit::Sek, 70_000).invert_sign();
        assert!(inverted.render().contains(r#"sign="-">70 000<"#));

        let negative = NonFraction::new("x:A", ContextRef::PERIOD0, Unit::Sek, -500);
        assert!(negative.render().contains(r#"sign="-">500<"#));

        let both = NonFraction::new("x:A", ContextRef::PERIOD0, Unit::Sek, -500).invert_sign();
        assert!(!both.render().contains("sign="));
    }

    #[test]
    fn test_numeric_options() {
        let fact = NonFraction::new("x:A", ContextRef::PERIOD1, Unit::Sek, 2_650_000)
            .scale(3)
            .neg_prefix()
            .wrap("sum")
            .member("ATuple2", 2);
        assert_eq!(
            fact.render(),
            r#"<span class="sum">-<ix:nonFraction contextRef="period1" name="x:A" unitRef="SEK" decimals="INF" scale="3" format="ixt:numspacecomma" tupleRef="ATuple2" order="2.0">2 650</ix:nonFraction></span>"#
        );

        let plain = NonFraction::new("x:B", ContextRef::PERIOD0, Unit::Employees, 12)
            .format(NumberFormat::Plain);
        assert!(!plain.render().contains("format="));
        assert!(plain.render().contains(r#"unitRef="antal-anstallda""#));
    }

    #[test]
    fn test_preformatted_numeral() {
        let fact = NonFraction::preformatted("x:Soliditet", ContextRef::BALANS0, Unit::Percent, "33,7")
            .scale(-2)
            .format(NumberFormat::Comma);
        assert_eq!(
            fact.render(),
            r#"<ix:nonFraction contextRef="balans0" name="x:Soliditet" unitRef="procent" decimals="INF" scale="-2" format="ixt:numcomma">33,7</ix:nonFraction>"#
        );
    }

    #[test]
    fn test_text_fact_escaping() {
        let out = render(|w| {
            w.non_numeric(
                &NonNumeric::new("x:Name", ContextRef::PERIOD0).id("n1"),
                "Bröd & <Smör> AB",
            )
        });
        assert_eq!(
            out,
            r#"<ix:nonNumeric name="x:Name" contextRef="period0" id="n1">Bröd &amp; &lt;Smör&gt; AB</ix:nonNumeric>"#
        );
    }

    #[test]
    fn test_split_text() {
        let out = render(|w| {
            let pending = w.split_non_numeric(
                &NonNumeric::new("x:Long", ContextRef::PERIOD0),
                "first half",
                "second half",
                "cont1",
            )?;
            w.raw("<p>between</p>")?;
            pending.emit(w)
        });
        assert_eq!(
            out,
            concat!(
                r#"<ix:nonNumeric name="x:Long" contextRef="period0" continuedAt="cont1">first half</ix:nonNumeric>"#,
                "<p>between</p>",
                r#"<ix:continuation id="cont1">second half</ix:continuation>"#
            )
        );
    }

    #[test]
    fn test_tuple_ids() {
        assert_eq!(
            tuple_ids("se-gen-base:SomeTuple", 2),
            vec!["SomeTuple1".to_string(), "SomeTuple2".to_string()]
        );
        let out = render(|w| w.tuple("se-gen-base:SomeTuple", "SomeTuple1"));
        assert_eq!(out, "<ix:tuple name=\"se-gen-base:SomeTuple\" tupleID=\"SomeTuple1\" />\n");
    }

    struct FailingSink {
        writes: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_sticky() {
        let mut w = FactWriter::new(FailingSink { writes: 0 });
        assert!(matches!(w.raw("<p>"), Err(IxbrlError::Write(_))));
        assert!(w.is_poisoned());
        assert!(matches!(w.line("<p>"), Err(IxbrlError::SinkFailed)));
        assert!(matches!(w.flush(), Err(IxbrlError::SinkFailed)));
        assert_eq!(w.into_inner().writes, 1);
    }
}
