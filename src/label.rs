use pulldown_latex::{
  Parser, Storage,
  event::{Content, Event, ScriptType},
};

/// Axis or title text. Segments between `$` signs are read as TeX math and
/// flattened to Unicode, so `$x_{0}$` displays as `x₀`.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
  source:  String,
  display: String,
}

#[derive(Clone, Copy, PartialEq)]
enum Shift {
  None,
  Sub,
  Sup,
}

impl Label {
  pub fn new(source: &str) -> Label {
    Label { source: source.to_string(), display: to_display(source) }
  }

  pub fn source(&self) -> &str { &self.source }
  pub fn display(&self) -> &str { &self.display }
}

fn to_display(source: &str) -> String {
  // An unpaired `$` is just a dollar sign.
  if source.matches('$').count() % 2 != 0 {
    return source.to_string();
  }

  let mut out = String::new();
  for (i, segment) in source.split('$').enumerate() {
    if i % 2 == 0 {
      out.push_str(segment);
      continue;
    }

    match math_to_unicode(segment) {
      Ok(text) => out.push_str(&text),
      Err(e) => {
        tracing::warn!(segment, "cannot parse math label: {e}");
        out.push_str(segment);
      }
    }
  }
  out
}

pub fn math_to_unicode(source: &str) -> Result<String, String> {
  let storage = Storage::new();
  let events =
    Parser::new(source, &storage).collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())?;

  let mut out = String::new();
  let mut rest = events.as_slice();
  while !rest.is_empty() {
    rest = write_element(rest, Shift::None, &mut out);
  }
  Ok(out)
}

/// Writes one element (a single event or a `Begin`..`End` group) and returns
/// the events after it.
fn write_element<'a, 'e>(
  events: &'a [Event<'e>],
  shift: Shift,
  out: &mut String,
) -> &'a [Event<'e>] {
  let Some((first, rest)) = events.split_first() else { return events };

  match first {
    Event::Content(content) => {
      write_content(content, shift, out);
      rest
    }
    Event::Begin(_) => {
      let mut rest = rest;
      while let Some(event) = rest.first() {
        if matches!(event, Event::End) {
          return &rest[1..];
        }
        rest = write_element(rest, shift, out);
      }
      rest
    }
    Event::Script { ty, .. } => {
      let rest = write_element(rest, shift, out);
      match ty {
        ScriptType::Subscript => write_element(rest, Shift::Sub, out),
        ScriptType::Superscript => write_element(rest, Shift::Sup, out),
        ScriptType::SubSuperscript => {
          let rest = write_element(rest, Shift::Sub, out);
          write_element(rest, Shift::Sup, out)
        }
      }
    }
    _ => rest,
  }
}

fn write_content(content: &Content<'_>, shift: Shift, out: &mut String) {
  match content {
    Content::Text(s) | Content::Number(s) | Content::Function(s) => {
      out.extend(s.chars().map(|c| shifted(c, shift)))
    }
    Content::Ordinary { content, .. } | Content::BinaryOp { content, .. } => {
      out.push(shifted(*content, shift))
    }
    Content::Punctuation(c) => out.push(shifted(*c, shift)),
    _ => {}
  }
}

fn shifted(c: char, shift: Shift) -> char {
  match shift {
    Shift::None => c,
    Shift::Sub => subscript(c).unwrap_or(c),
    Shift::Sup => superscript(c).unwrap_or(c),
  }
}

fn subscript(c: char) -> Option<char> {
  Some(match c {
    '0'..='9' => char::from_u32('₀' as u32 + (c as u32 - '0' as u32))?,
    '+' => '₊',
    '-' | '−' => '₋',
    '=' => '₌',
    '(' => '₍',
    ')' => '₎',
    'a' => 'ₐ',
    'e' => 'ₑ',
    'h' => 'ₕ',
    'i' => 'ᵢ',
    'j' => 'ⱼ',
    'k' => 'ₖ',
    'l' => 'ₗ',
    'm' => 'ₘ',
    'n' => 'ₙ',
    'o' => 'ₒ',
    'p' => 'ₚ',
    'r' => 'ᵣ',
    's' => 'ₛ',
    't' => 'ₜ',
    'u' => 'ᵤ',
    'v' => 'ᵥ',
    'x' => 'ₓ',
    _ => return None,
  })
}

fn superscript(c: char) -> Option<char> {
  Some(match c {
    '0' => '⁰',
    '1' => '¹',
    '2' => '²',
    '3' => '³',
    '4'..='9' => char::from_u32('⁴' as u32 + (c as u32 - '4' as u32))?,
    '+' => '⁺',
    '-' | '−' => '⁻',
    '=' => '⁼',
    '(' => '⁽',
    ')' => '⁾',
    'i' => 'ⁱ',
    'n' => 'ⁿ',
    _ => return None,
  })
}
