use crate::image::has_image;
use crate::input::Section;
use crate::revisions::{Fetch, Revisions};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionResult {
    pub no_image: Vec<String>,
    pub timed_out: Vec<String>,
}

/// Checks each title in turn. Every title is attempted once; missing pages
/// land in neither list.
pub fn process_section<S: Revisions + ?Sized>(source: &S, titles: &[String]) -> SectionResult {
    let mut result = SectionResult::default();
    for title in titles {
        info!("Checking: {}", title);
        let text = match source.fetch_article(title) {
            Fetch::TimedOut => {
                result.timed_out.push(title.clone());
                continue;
            }
            Fetch::NotFound => {
                warn!("  Could not fetch wikitext for {}", title);
                continue;
            }
            Fetch::Found(text) => text,
        };
        if has_image(Some(&text)) {
            info!("  Image found");
        } else {
            info!("  No image found");
            result.no_image.push(title.clone());
        }
    }
    result
}

#[derive(Debug, Default)]
pub struct Report {
    buf: String,
}
impl Report {
    pub fn new() -> Report {
        Report::default()
    }
    /// Appends one section block. Articles listed before any header are
    /// reported under `== Untitled ==`.
    pub fn push(&mut self, section: &Section, result: &SectionResult) {
        let name = section.name.as_deref().unwrap_or("Untitled");
        self.buf.push_str(&format!("\n== {} ==\n", name));
        self.buf.push_str("\nArticles without infobox image or File Commons:\n");
        for title in &result.no_image {
            self.buf.push_str(&format!("# [[{}]]\n", title));
        }
        self.buf.push_str("\nArticles with Request timed out:\n");
        for title in &result.timed_out {
            self.buf.push_str(&format!("# [[{}]]\n", title));
        }
    }
    pub fn finish(&self) -> &str {
        self.buf.trim()
    }
}

/// First of `base`, `<stem>1.<ext>`, `<stem>2.<ext>`, ... that does not exist yet.
pub fn output_path(base: &Path) -> PathBuf {
    if !base.exists() {
        return base.to_owned();
    }
    let stem = base.file_stem().unwrap_or_default().to_string_lossy();
    let ext = base.extension().map(|e| e.to_string_lossy());
    (1u32..)
        .map(|i| {
            let name = match &ext {
                Some(ext) => format!("{}{}.{}", stem, i, ext),
                None => format!("{}{}", stem, i),
            };
            base.with_file_name(name)
        })
        .find(|path| !path.exists())
        .unwrap_or_else(|| base.to_owned())
}
