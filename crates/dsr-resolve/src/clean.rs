//! Evidence text cleanup.
//!
//! Extracted evidence passages carry PDF furniture: document banners,
//! confidentiality notices, version/date stamps, page numbers. These are
//! stripped before resolved content is handed to downstream consumers.
//! The transform is pure and idempotent, and is never applied to
//! placeholder text.

use std::sync::LazyLock;

use regex::Regex;

/// Header banner naming the originating document. Only short, heading-like
/// lines qualify; prose sentences mentioning the document are kept.
static DOC_BANNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[^.!?]{0,60}\b(?:investigator'?s\s+brochure|periodic\s+benefit[-\u{2013}]risk\s+evaluation\s+report|drug\s+safety\s+report)\b[^.!?]{0,40}$",
    )
    .expect("document banner pattern")
});

static CONFIDENTIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:company\s+|strictly\s+)?confidential(?:\s+information)?\s*$")
        .expect("confidentiality banner pattern")
});

/// Version or date stamp lines, e.g. `Version 12.0`, `Date: 04 Mar 2024`,
/// or a standalone `04 March 2024`.
static STAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(?:version|ver\.?)\s*[:#]?\s*\d+(?:\.\d+)*\S*|(?:effective\s+date|release\s+date|date)\s*:\s*\S.*|\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})\s*$",
    )
    .expect("version/date stamp pattern")
});

/// Standalone page number, or a `Page N` / `Page N of M` footer.
static PAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\d{1,4}|page\s+\d+(?:\s*(?:of|/)\s*\d+)?)\s*$")
        .expect("page number pattern")
});

fn is_boilerplate(line: &str) -> bool {
    CONFIDENTIAL_RE.is_match(line)
        || STAMP_RE.is_match(line)
        || PAGE_RE.is_match(line)
        || DOC_BANNER_RE.is_match(line)
}

/// Strip PDF boilerplate from an evidence passage.
///
/// Drops banner/stamp/page-number lines, collapses runs of three or more
/// blank lines to exactly two, and trims surrounding whitespace.
#[must_use]
pub fn clean_source_text(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut blanks = 0usize;

    for line in text.lines() {
        if is_boilerplate(line) {
            continue;
        }
        if line.trim().is_empty() {
            blanks += 1;
            if blanks <= 2 {
                out.push("");
            }
            continue;
        }
        blanks = 0;
        out.push(line);
    }

    out.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(
            clean_source_text("Drug background content."),
            "Drug background content."
        );
    }

    #[test]
    fn strips_banners_stamps_and_pages() {
        let raw = "Pralsetinib Investigator's Brochure\n\
                   CONFIDENTIAL\n\
                   Version 12.0\n\
                   Date: 04 Mar 2024\n\
                   The drug is a selective RET inhibitor.\n\
                   Page 12 of 345\n\
                   47\n";
        assert_eq!(clean_source_text(raw), "The drug is a selective RET inhibitor.");
    }

    #[test]
    fn keeps_prose_mentioning_the_document() {
        let raw = "Full details are given in the Investigator's Brochure for this compound.";
        assert_eq!(clean_source_text(raw), raw);
    }

    #[test]
    fn collapses_blank_runs_to_two() {
        let raw = "First paragraph.\n\n\n\n\nSecond paragraph.";
        assert_eq!(
            clean_source_text(raw),
            "First paragraph.\n\n\nSecond paragraph."
        );
    }

    #[test]
    fn idempotent() {
        let raw = "CONFIDENTIAL\nA sentence.\n\n\n\n\nAnother.\nPage 3 of 9\n";
        let once = clean_source_text(raw);
        assert_eq!(clean_source_text(&once), once);
    }
}
