use crate::Error;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

// `==` and `===` headers only; the delimiter runs on both sides must agree.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:===\s*([^=]+?)\s*===|==\s*([^=]+?)\s*==)$").unwrap()
});
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());
// Interwiki language codes such as [[en]].
static LANG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{2}$").unwrap());

const MARKER: &str = "WikiProjectMed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    /// `None` for articles listed before the first header.
    pub name: Option<String>,
    pub articles: Vec<String>,
}

pub fn read_input(path: &Path) -> Result<String, Error> {
    if !path.exists() {
        return Err(Error::MissingInput(path.to_owned()));
    }
    Ok(String::from_utf8_lossy(&fs::read(path)?).into_owned())
}

// Whitespace plus the byte-order mark some editors put at the start of a file.
fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn header(line: &str) -> Option<&str> {
    let cap = HEADER.captures(line)?;
    cap.get(1).or_else(|| cap.get(2)).map(|m| trim(m.as_str()))
}

fn excluded(title: &str) -> bool {
    title.starts_with("WikiProjectMed:")
        || title.starts_with("Image:")
        || LANG.is_match(title)
        || title.contains('[')
}

struct Fold {
    done: Vec<Section>,
    current: Section,
    in_marker_block: bool,
}
impl Fold {
    fn close(&mut self, next: Section) {
        let prev = std::mem::replace(&mut self.current, next);
        if !prev.articles.is_empty() {
            self.done.push(prev);
        }
    }
    fn line(mut self, line: &str) -> Fold {
        let line = trim(line);
        if let Some(name) = header(line) {
            self.close(Section {
                name: Some(name.to_owned()),
                articles: Vec::new(),
            });
            self.in_marker_block = false;
            return self;
        }
        for cap in LINK.captures_iter(line) {
            let title = trim(&cap[1]);
            if title == MARKER {
                self.in_marker_block = true;
                continue;
            }
            if self.in_marker_block || excluded(title) {
                continue;
            }
            self.current.articles.push(title.to_owned());
        }
        self
    }
}

/// Splits the input into sections of article titles, in document order.
/// Sections that end up without any article are dropped.
pub fn parse_sections(content: &str) -> Vec<Section> {
    let start = Fold {
        done: Vec::new(),
        current: Section::default(),
        in_marker_block: false,
    };
    let mut fold = content.lines().fold(start, Fold::line);
    fold.close(Section::default());
    fold.done
}
