//! crates/logr/src/format.rs
//! Runtime printf-style substitution for [`Logger::log`](crate::Logger::log).
//!
//! Specifiers follow the shape `%[index$|<][flags][width][.precision]conversion`.
//!
//! | conversion | accepts                       | output                              |
//! |------------|-------------------------------|-------------------------------------|
//! | `s` `S`    | anything                      | `Display` text, `S` upper-cased     |
//! | `d`        | integers                      | decimal                             |
//! | `x` `X` `o`| integers                      | hex / octal, negatives as two's complement |
//! | `f` `e` `E`| floats                        | fixed / scientific, precision 6     |
//! | `b` `B`    | anything                      | the bool, or `true` for non-bools   |
//! | `c` `C`    | chars, integer code points    | the character                       |
//! | `%`        | nothing                       | `%`                                 |
//! | `n`        | nothing                       | the platform line terminator        |
//!
//! Flags: `-` left-justify, `0` zero-pad, `+` always sign, space sign slot,
//! `,` digit grouping, `#` radix prefix. Ordinary specifiers take arguments in
//! order; `2$` picks the second argument without moving the cursor and `<`
//! repeats the previous one. Arguments left over at the end are ignored.
//! Widths and precisions are limited to 65535.

use std::fmt::{self, Write as _};

use crate::error::FormatError;
use crate::logger::LINE_ENDING;

/// One argument for a printf-style template.
///
/// Usually built through [`From`] or the [`args!`](crate::args) macro.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    /// A signed integer and the bit width of its source type.
    ///
    /// The width decides how many two's complement digits `x X o` print
    /// for negative values.
    Int {
        /// The value, sign-extended.
        value: i64,
        /// Bit width of the source type.
        bits: u32,
    },
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// A single character.
    Char(char),
    /// A string slice.
    Str(&'a str),
    /// Any other printable value.
    Display(&'a dyn fmt::Display),
}

impl<'a> Arg<'a> {
    /// Wraps any [`Display`](fmt::Display) value.
    pub fn display<T: fmt::Display>(value: &'a T) -> Self {
        Self::Display(value)
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Int { .. } | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::Display(_) => "display",
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { value, .. } => f.debug_tuple("Int").field(value).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Display(v) => f.debug_tuple("Display").field(&v.to_string()).finish(),
        }
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&float_text(*v)),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Display(v) => v.fmt(f),
        }
    }
}

macro_rules! arg_from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Arg<'_> {
            fn from(value: $ty) -> Self {
                Self::Int {
                    value: i64::from(value),
                    bits: <$ty>::BITS,
                }
            }
        }
    )*};
}

macro_rules! arg_from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Arg<'_> {
            fn from(value: $ty) -> Self {
                Self::UInt(u64::from(value))
            }
        }
    )*};
}

arg_from_signed!(i8, i16, i32, i64);
arg_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Arg<'_> {
    fn from(value: isize) -> Self {
        Self::Int {
            value: value as i64,
            bits: isize::BITS,
        }
    }
}

impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value.as_str())
    }
}

/// Builds a `&[Arg]` slice from heterogeneous values.
///
/// ```
/// use logr::{args, format::format};
///
/// let name = String::from("disk");
/// let text = format("%s at %d%%", args![&name, 93]).unwrap();
/// assert_eq!(text, "disk at 93%");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        &[] as &[$crate::Arg<'_>]
    };
    ($($value:expr),+ $(,)?) => {
        &[$($crate::Arg::from($value)),+] as &[$crate::Arg<'_>]
    };
}

/// Substitutes `args` into `template`.
///
/// ```
/// use logr::{args, format::format};
///
/// assert_eq!(format("x=%d", args![5]).unwrap(), "x=5");
/// assert_eq!(format("%-5s|%05.1f", args!["ab", 3.14159]).unwrap(), "ab   |003.1");
/// assert!(format("%d %d", args![1]).is_err());
/// ```
pub fn format(template: &str, args: &[Arg<'_>]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut cursor = 0usize;
    let mut previous: Option<usize> = None;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let spec = Spec::parse(&rest[pos..])?;
        rest = &rest[pos + spec.text.len()..];

        if !spec.conversion.takes_argument() {
            spec.render_literal(&mut out)?;
            continue;
        }

        let index = match spec.index {
            ArgIndex::Next => {
                let index = cursor;
                cursor += 1;
                index
            }
            ArgIndex::Explicit(position) => position - 1,
            ArgIndex::Previous => previous.ok_or_else(|| FormatError::InvalidArgumentIndex {
                specifier: spec.text.to_owned(),
            })?,
        };
        let arg = args.get(index).ok_or_else(|| FormatError::MissingArgument {
            specifier: spec.text.to_owned(),
        })?;
        previous = Some(index);
        spec.render(arg, &mut out)?;
    }

    out.push_str(rest);
    Ok(out)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ArgIndex {
    Next,
    Explicit(usize),
    Previous,
}

#[derive(Clone, Copy, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
struct Flags {
    left: bool,
    alternate: bool,
    plus: bool,
    space: bool,
    zero: bool,
    group: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Conversion {
    Text { upper: bool },
    Decimal,
    Hex { upper: bool },
    Octal,
    Fixed,
    Scientific { upper: bool },
    Boolean { upper: bool },
    Character { upper: bool },
    Percent,
    Newline,
}

impl Conversion {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            's' => Self::Text { upper: false },
            'S' => Self::Text { upper: true },
            'd' => Self::Decimal,
            'x' => Self::Hex { upper: false },
            'X' => Self::Hex { upper: true },
            'o' => Self::Octal,
            'f' => Self::Fixed,
            'e' => Self::Scientific { upper: false },
            'E' => Self::Scientific { upper: true },
            'b' => Self::Boolean { upper: false },
            'B' => Self::Boolean { upper: true },
            'c' => Self::Character { upper: false },
            'C' => Self::Character { upper: true },
            '%' => Self::Percent,
            'n' => Self::Newline,
            _ => return None,
        })
    }

    const fn takes_argument(self) -> bool {
        !matches!(self, Self::Percent | Self::Newline)
    }

    const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Decimal | Self::Hex { .. } | Self::Octal | Self::Fixed | Self::Scientific { .. }
        )
    }

    const fn letter(self) -> char {
        match self {
            Self::Text { upper: false } => 's',
            Self::Text { upper: true } => 'S',
            Self::Decimal => 'd',
            Self::Hex { upper: false } => 'x',
            Self::Hex { upper: true } => 'X',
            Self::Octal => 'o',
            Self::Fixed => 'f',
            Self::Scientific { upper: false } => 'e',
            Self::Scientific { upper: true } => 'E',
            Self::Boolean { upper: false } => 'b',
            Self::Boolean { upper: true } => 'B',
            Self::Character { upper: false } => 'c',
            Self::Character { upper: true } => 'C',
            Self::Percent => '%',
            Self::Newline => 'n',
        }
    }
}

/// Largest width or precision accepted in a specifier.
const MAX_FIELD: usize = u16::MAX as usize;

#[derive(Debug)]
struct Spec<'t> {
    text: &'t str,
    index: ArgIndex,
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: Conversion,
}

impl<'t> Spec<'t> {
    /// Parses the specifier at the start of `input`, which begins with `%`.
    fn parse(input: &'t str) -> Result<Self, FormatError> {
        let bytes = input.as_bytes();
        let mut pos = 1;

        let mut index = ArgIndex::Next;
        if bytes.get(pos) == Some(&b'<') {
            index = ArgIndex::Previous;
            pos += 1;
        } else {
            let digits = count_digits(&bytes[pos..]);
            if digits > 0 && bytes.get(pos + digits) == Some(&b'$') {
                let position = parse_number(&input[pos..pos + digits]);
                pos += digits + 1;
                if position == 0 {
                    return Err(FormatError::InvalidArgumentIndex {
                        specifier: input[..pos].to_owned(),
                    });
                }
                index = ArgIndex::Explicit(position);
            }
        }

        let mut flags = Flags::default();
        while let Some(&byte) = bytes.get(pos) {
            let flag = match byte {
                b'-' => &mut flags.left,
                b'#' => &mut flags.alternate,
                b'+' => &mut flags.plus,
                b' ' => &mut flags.space,
                b'0' => &mut flags.zero,
                b',' => &mut flags.group,
                _ => break,
            };
            *flag = true;
            pos += 1;
        }

        let digits = count_digits(&bytes[pos..]);
        let width = (digits > 0).then(|| parse_number(&input[pos..pos + digits]));
        pos += digits;

        let mut precision = None;
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            let digits = count_digits(&bytes[pos..]);
            if digits == 0 {
                return Err(unknown_conversion(input, pos));
            }
            precision = Some(parse_number(&input[pos..pos + digits]));
            pos += digits;
        }

        let Some(letter) = input[pos..].chars().next() else {
            return Err(unknown_conversion(input, pos));
        };
        let end = pos + letter.len_utf8();
        let Some(conversion) = Conversion::from_char(letter) else {
            return Err(unknown_conversion(input, end));
        };

        let spec = Self {
            text: &input[..end],
            index,
            flags,
            width,
            precision,
            conversion,
        };
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<(), FormatError> {
        let flags = self.flags;
        if (flags.left || flags.zero) && self.width.is_none() {
            return Err(FormatError::MissingWidth {
                specifier: self.text.to_owned(),
            });
        }

        let oversized = self.width.is_some_and(|width| width > MAX_FIELD)
            || self.precision.is_some_and(|precision| precision > MAX_FIELD);

        let numeric = self.conversion.is_numeric();
        let contradictory = (flags.left && flags.zero) || (flags.plus && flags.space);
        let radix = matches!(self.conversion, Conversion::Hex { .. } | Conversion::Octal);
        let misplaced = ((flags.zero || flags.plus || flags.space) && !numeric)
            || (flags.alternate && !radix)
            || (flags.group && !matches!(self.conversion, Conversion::Decimal | Conversion::Fixed))
            || ((flags.plus || flags.space) && radix)
            || (!self.conversion.takes_argument() && self.precision.is_some());
        let precision_on_integer = self.precision.is_some()
            && matches!(
                self.conversion,
                Conversion::Decimal
                    | Conversion::Hex { .. }
                    | Conversion::Octal
                    | Conversion::Character { .. }
            );

        if oversized || contradictory || misplaced || precision_on_integer {
            return Err(FormatError::IllegalFlags {
                specifier: self.text.to_owned(),
            });
        }
        Ok(())
    }

    fn render_literal(&self, out: &mut String) -> Result<(), FormatError> {
        match self.conversion {
            Conversion::Percent => {
                self.pad(out, "", "%");
                Ok(())
            }
            Conversion::Newline => {
                out.push_str(LINE_ENDING);
                Ok(())
            }
            _ => Err(unknown_conversion(self.text, self.text.len())),
        }
    }

    fn render(&self, arg: &Arg<'_>, out: &mut String) -> Result<(), FormatError> {
        match self.conversion {
            Conversion::Text { upper } => {
                let text = arg.to_string();
                let text = match self.precision {
                    Some(limit) => text.chars().take(limit).collect(),
                    None => text,
                };
                let text = if upper { text.to_uppercase() } else { text };
                self.pad(out, "", &text);
            }
            Conversion::Boolean { upper } => {
                let value = match arg {
                    Arg::Bool(value) => *value,
                    _ => true,
                };
                let text = if value { "true" } else { "false" };
                let text: String = match self.precision {
                    Some(limit) => text.chars().take(limit).collect(),
                    None => text.to_owned(),
                };
                let text = if upper { text.to_uppercase() } else { text };
                self.pad(out, "", &text);
            }
            Conversion::Character { upper } => {
                let c = match arg {
                    Arg::Char(c) => *c,
                    Arg::Int { value, .. } => code_point(*value).ok_or_else(|| self.illegal(arg))?,
                    Arg::UInt(v) => i64::try_from(*v)
                        .ok()
                        .and_then(code_point)
                        .ok_or_else(|| self.illegal(arg))?,
                    _ => return Err(self.illegal(arg)),
                };
                let text: String = if upper {
                    c.to_uppercase().collect()
                } else {
                    c.to_string()
                };
                self.pad(out, "", &text);
            }
            Conversion::Decimal => {
                let (negative, magnitude) = match arg {
                    Arg::Int { value, .. } => (*value < 0, value.unsigned_abs()),
                    Arg::UInt(v) => (false, *v),
                    _ => return Err(self.illegal(arg)),
                };
                let mut digits = magnitude.to_string();
                if self.flags.group {
                    digits = group_thousands(&digits);
                }
                self.pad_number(out, self.sign(negative), &digits);
            }
            Conversion::Hex { upper } => {
                let bits = integer_bits(arg).ok_or_else(|| self.illegal(arg))?;
                let digits = if upper {
                    format!("{bits:X}")
                } else {
                    format!("{bits:x}")
                };
                let prefix = match (self.flags.alternate, upper) {
                    (false, _) => "",
                    (true, false) => "0x",
                    (true, true) => "0X",
                };
                self.pad_number(out, prefix, &digits);
            }
            Conversion::Octal => {
                let bits = integer_bits(arg).ok_or_else(|| self.illegal(arg))?;
                let prefix = if self.flags.alternate { "0" } else { "" };
                self.pad_number(out, prefix, &format!("{bits:o}"));
            }
            Conversion::Fixed => {
                let Arg::Float(value) = arg else {
                    return Err(self.illegal(arg));
                };
                if !value.is_finite() {
                    self.pad(out, "", &non_finite(*value, self.flags.plus));
                    return Ok(());
                }
                let precision = self.precision.unwrap_or(6);
                let mut digits = format!("{:.*}", precision, value.abs());
                if self.flags.group {
                    digits = group_fixed(&digits);
                }
                self.pad_number(out, self.sign(value.is_sign_negative()), &digits);
            }
            Conversion::Scientific { upper } => {
                let Arg::Float(value) = arg else {
                    return Err(self.illegal(arg));
                };
                if !value.is_finite() {
                    self.pad(out, "", &non_finite(*value, self.flags.plus));
                    return Ok(());
                }
                let precision = self.precision.unwrap_or(6);
                let mut digits = scientific(value.abs(), precision);
                if upper {
                    digits = digits.to_uppercase();
                }
                self.pad_number(out, self.sign(value.is_sign_negative()), &digits);
            }
            Conversion::Percent | Conversion::Newline => self.render_literal(out)?,
        }
        Ok(())
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        }
    }

    fn pad(&self, out: &mut String, prefix: &str, body: &str) {
        let len = prefix.chars().count() + body.chars().count();
        let fill = self.width.map_or(0, |width| width.saturating_sub(len));
        if self.flags.left {
            out.push_str(prefix);
            out.push_str(body);
            push_repeated(out, ' ', fill);
        } else {
            push_repeated(out, ' ', fill);
            out.push_str(prefix);
            out.push_str(body);
        }
    }

    fn pad_number(&self, out: &mut String, prefix: &str, digits: &str) {
        if self.flags.zero {
            let len = prefix.len() + digits.len();
            let fill = self.width.map_or(0, |width| width.saturating_sub(len));
            out.push_str(prefix);
            push_repeated(out, '0', fill);
            out.push_str(digits);
        } else {
            self.pad(out, prefix, digits);
        }
    }

    fn illegal(&self, arg: &Arg<'_>) -> FormatError {
        FormatError::IllegalConversion {
            conversion: self.conversion.letter(),
            argument: arg.kind(),
        }
    }
}

fn unknown_conversion(input: &str, end: usize) -> FormatError {
    let end = end.min(input.len());
    FormatError::UnknownConversion {
        specifier: input[..end].to_owned(),
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_number(digits: &str) -> usize {
    digits
        .bytes()
        .fold(0usize, |acc, b| acc.saturating_mul(10).saturating_add(usize::from(b - b'0')))
}

fn push_repeated(out: &mut String, c: char, count: usize) {
    out.extend(std::iter::repeat_n(c, count));
}

fn integer_bits(arg: &Arg<'_>) -> Option<u64> {
    match arg {
        Arg::Int { value, bits } => {
            let mask = u64::MAX >> (u64::BITS - (*bits).clamp(1, u64::BITS));
            Some((*value as u64) & mask)
        }
        Arg::UInt(v) => Some(*v),
        _ => None,
    }
}

fn code_point(value: i64) -> Option<char> {
    u32::try_from(value).ok().and_then(char::from_u32)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn group_fixed(digits: &str) -> String {
    match digits.split_once('.') {
        Some((whole, fraction)) => format!("{}.{fraction}", group_thousands(whole)),
        None => group_thousands(digits),
    }
}

/// `1234.5` at precision 2 becomes `1.23e+03`.
fn scientific(value: f64, precision: usize) -> String {
    let rendered = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    let mut out = String::with_capacity(mantissa.len() + 4);
    let _ = write!(out, "{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    out
}

fn non_finite(value: f64, plus: bool) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_sign_negative() {
        "-Infinity".to_owned()
    } else if plus {
        "+Infinity".to_owned()
    } else {
        "Infinity".to_owned()
    }
}

fn float_text(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        non_finite(value, false)
    }
}
