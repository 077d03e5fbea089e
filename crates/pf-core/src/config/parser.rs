use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, line_ending, space0},
    combinator::opt,
    IResult,
};

/// One meaningful line of a settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub key: String,
    pub value: String,
    /// 1-based line number in the source text.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Setting { key: String, value: String },
    Ignored,
}

// nom parsers

fn is_not_newline(c: char) -> bool {
    c != '\n' && c != '\r'
}

fn comment_line(input: &str) -> IResult<&str, Line> {
    let (input, _) = space0(input)?;
    let (input, _) = char('#')(input)?;
    let (input, _) = take_while(is_not_newline)(input)?;
    let (input, _) = opt(line_ending)(input)?;
    Ok((input, Line::Ignored))
}

fn blank_line(input: &str) -> IResult<&str, Line> {
    let (input, _) = space0(input)?;
    let (input, _) = line_ending(input)?;
    Ok((input, Line::Ignored))
}

fn key_chars(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.')(input)
}

fn setting_line(input: &str) -> IResult<&str, Line> {
    let (input, _) = space0(input)?;
    let (input, key) = key_chars(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = char('=')(input)?;
    let (input, _) = space0(input)?;
    let (input, value) = take_while(is_not_newline)(input)?;
    let (input, _) = opt(line_ending)(input)?;
    Ok((
        input,
        Line::Setting {
            key: key.to_string(),
            value: strip_quotes(value.trim_end()).to_string(),
        },
    ))
}

/// `"json"` and `json` are the same value.
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn any_line(input: &str) -> IResult<&str, Line> {
    alt((comment_line, blank_line, setting_line))(input)
}

/// Parse `key = value` settings, skipping comments and blank lines.
///
/// Returns the settings in file order. Fails on the first line that is not a
/// comment, blank, or setting, reporting its line number.
pub fn parse_settings(input: &str) -> Result<Vec<Setting>, String> {
    let mut settings = Vec::new();
    let mut rest = input;
    let mut line_no = 1;

    while let Ok((next, line)) = any_line(rest) {
        if next.len() == rest.len() {
            break;
        }
        if let Line::Setting { key, value } = line {
            settings.push(Setting {
                key,
                value,
                line: line_no,
            });
        }
        line_no += rest[..rest.len() - next.len()].matches('\n').count();
        rest = next;
    }

    if !rest.trim().is_empty() {
        let snippet: String = rest.lines().next().unwrap_or_default().chars().take(60).collect();
        return Err(format!("line {}: unparsed content {:?}", line_no, snippet));
    }
    Ok(settings)
}
