use regex::Regex;
use std::fmt;

type ScanFn = Box<dyn Fn(&str) -> Option<usize> + Send + Sync>;
type Transform<T> = Box<dyn Fn(&str) -> Option<T> + Send + Sync>;

/// Decides how much of the input, starting at the cursor, a pattern accepts.
pub enum Matcher {
    Regex(Regex),
    // returns the byte length of the accepted prefix
    Scan(ScanFn),
}

impl Matcher {
    /// Compile `re` anchored at the cursor, ie: `^(?:re)`.
    pub fn regex(re: &str) -> Result<Matcher, regex::Error> {
        Regex::new(&format!("^(?:{})", re)).map(Matcher::Regex)
    }

    pub fn scan(scan: impl Fn(&str) -> Option<usize> + Send + Sync + 'static) -> Matcher {
        Matcher::Scan(Box::new(scan))
    }

    /// Length in bytes of the match starting at the beginning of `input`.
    /// Empty matches don't count, they would never move the cursor.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        let len = match self {
            // leftmost-first: if there's a match at 0 find() returns it
            Matcher::Regex(re) => re.find(input)
                .filter(|m| m.start() == 0)
                .map(|m| m.end()),
            Matcher::Scan(scan) => scan(input)
                .filter(|&n| input.is_char_boundary(n)),
        };
        len.filter(|&n| n > 0)
    }
}

impl From<Regex> for Matcher {
    fn from(re: Regex) -> Self {
        Matcher::Regex(re)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Matcher::Regex(re) => write!(f, "Regex({})", re.as_str()),
            Matcher::Scan(_) => write!(f, "Scan"),
        }
    }
}

/// A category, what it matches and how the matched text becomes a value.
/// When the transform yields `None` the match is consumed without a token.
pub struct Pattern<T> {
    category: String,
    matcher: Matcher,
    transform: Transform<T>,
}

impl<T> Pattern<T> {
    pub fn new(
        category: impl Into<String>,
        matcher: Matcher,
        transform: impl Fn(&str) -> Option<T> + Send + Sync + 'static) -> Self
    {
        Pattern {
            category: category.into(),
            matcher,
            transform: Box::new(transform),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.matcher.match_len(input)
    }

    pub fn transform(&self, lexeme: &str) -> Option<T> {
        (self.transform)(lexeme)
    }
}

impl<T> fmt::Debug for Pattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pattern({}, {:?})", self.category, self.matcher)
    }
}

///////////////////////////////////////////////////////////////////////////////
